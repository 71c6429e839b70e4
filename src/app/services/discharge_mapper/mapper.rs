//! Discharge activity construction

use super::timing::{localize, midpoint};
use crate::app::models::{
    ChannelMeasurement, ChannelMeasurementContext, DischargeActivity, FlowCalculationMethod,
    GaugingSummaryItem, LocationInfo, ParseContext, PointVelocityDischarge,
    VelocityObservationMethod, Vertical,
};
use crate::app::services::calibration_mapper::MeterCalibrationResolver;
use crate::app::services::vertical_calculator;
use crate::config::PluginConfig;
use crate::{Error, Result};
use tracing::debug;

/// Maps gaugings to discharge activities under one host parse context
#[derive(Debug, Clone)]
pub struct DischargeActivityMapper {
    context: ParseContext,
    channel: ChannelMeasurementContext,
    default_channel_name: String,
}

impl DischargeActivityMapper {
    pub fn new(
        context: ParseContext,
        channel: ChannelMeasurementContext,
        default_channel_name: impl Into<String>,
    ) -> Self {
        Self {
            context,
            channel,
            default_channel_name: default_channel_name.into(),
        }
    }

    /// Create a mapper from plugin configuration
    pub fn from_config(config: &PluginConfig) -> Self {
        Self::new(
            ParseContext::from_config(config),
            ChannelMeasurementContext::new(config.deployment_method),
            config.default_channel_name.clone(),
        )
    }

    /// Map one gauging taken at `location`
    ///
    /// Fails when the location's UTC offset is out of range, when the gauging
    /// ends before it starts, or when the resolver cannot map the meter.
    pub fn map<R>(
        &self,
        location: &LocationInfo,
        gauging: &GaugingSummaryItem,
        resolver: &R,
    ) -> Result<DischargeActivity>
    where
        R: MeterCalibrationResolver + ?Sized,
    {
        let start_time = localize(gauging.start_date, location)?;
        let end_time = localize(gauging.end_date, location)?;
        if end_time < start_time {
            return Err(Error::data_validation(format!(
                "Gauging {} ends ({}) before it starts ({})",
                gauging.gauging_id, end_time, start_time
            )));
        }

        let discharge_method = self
            .discharge_method_code(&gauging.flow_calculation_method)
            .to_string();

        let verticals = vertical_calculator::compute(
            &gauging.panel_items,
            gauging.meter_details.as_ref(),
            &self.channel,
            resolver,
        )?;

        debug!(
            "Gauging {}: {} verticals, method {}",
            gauging.gauging_id,
            verticals.len(),
            discharge_method
        );

        let sub_activity = PointVelocityDischarge {
            channel_measurement: self.channel_measurement(location, gauging),
            discharge_method_code: discharge_method.clone(),
            velocity_observation_method: shared_observation_method(&verticals),
            verticals,
        };

        Ok(DischargeActivity {
            start_time,
            end_time,
            measurement_time: midpoint(start_time, end_time),
            party: gauging.observers_name.clone(),
            discharge_method,
            discharge: gauging.flow,
            discharge_unit: self.context.discharge_unit.clone(),
            gage_height_unit: self.context.gage_height_unit.clone(),
            gage_height_method: self.context.default_monitoring_method.clone(),
            mean_gage_height: gauging.effective_mean_stage(),
            mean_index_velocity: gauging.mean_velocity,
            comments: gauging.comments.clone(),
            discharge_sub_activities: vec![sub_activity],
        })
    }

    /// Host monitoring method code for a logger calculation method
    pub fn discharge_method_code(&self, method: &FlowCalculationMethod) -> &str {
        match method {
            FlowCalculationMethod::Mean => &self.context.mean_section_method,
            FlowCalculationMethod::Mid => &self.context.mid_section_method,
            FlowCalculationMethod::Unknown(_) => &self.context.default_monitoring_method,
        }
    }

    fn channel_measurement(
        &self,
        location: &LocationInfo,
        gauging: &GaugingSummaryItem,
    ) -> ChannelMeasurement {
        let channel_name = location
            .primary_channel()
            .unwrap_or(self.default_channel_name.as_str())
            .to_string();
        let width = gauging
            .panel_items
            .last()
            .map(|panel| panel.distance)
            .unwrap_or(0.0);

        ChannelMeasurement {
            channel_name,
            deployment_method: self.channel.deployment_method,
            distance_to_meter_unit: self.context.distance_unit.clone(),
            area_unit: self.context.area_unit.clone(),
            velocity_unit: self.context.velocity_unit.clone(),
            width_unit: self.context.distance_unit.clone(),
            area: gauging.area,
            velocity: gauging.mean_velocity,
            discharge: gauging.flow,
            width,
        }
    }
}

/// The method every vertical shares, or `Unclassified` when they differ
fn shared_observation_method(verticals: &[Vertical]) -> VelocityObservationMethod {
    let mut methods = verticals
        .iter()
        .map(|vertical| vertical.velocity_observation.velocity_observation_method);

    let Some(first) = methods.next() else {
        return VelocityObservationMethod::Unclassified;
    };

    if methods.all(|method| method == first) {
        first
    } else {
        VelocityObservationMethod::Unclassified
    }
}
