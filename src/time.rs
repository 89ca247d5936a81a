//! Simulation speed control.
//!
//! The scale multiplies how fast virtual time, and with it the fixed step
//! schedule, advances relative to real time. Zero pauses the simulation.

use bevy::prelude::*;

/// Largest allowed time scale.
pub const MAX_TIME_SCALE: f32 = 1000.0;

/// Plugin keeping Bevy's virtual clock in sync with [`TimeScale`].
pub struct TimePlugin;

impl Plugin for TimePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TimeScale>()
            .add_systems(Update, apply_time_scale);
    }
}

#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    scale: f32,
}

impl Default for TimeScale {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl TimeScale {
    pub fn new(scale: f32) -> Self {
        Self {
            scale: scale.clamp(0.0, MAX_TIME_SCALE),
        }
    }

    pub fn get(&self) -> f32 {
        self.scale
    }

    pub fn is_paused(&self) -> bool {
        self.scale == 0.0
    }

    /// Step up; the increment grows with the current scale.
    pub fn speed_up(&mut self) {
        let increment = (2f32.powi(self.scale.trunc() as i32) / 10.0).clamp(0.1, 2.0);
        self.scale = (self.scale + increment).min(MAX_TIME_SCALE);
    }

    /// Step down, mirroring `speed_up`, never below zero.
    pub fn slow_down(&mut self) {
        let decrement = (2f32.powi(self.scale.trunc() as i32 - 1) / 10.0).clamp(0.1, 2.0);
        self.scale = (self.scale - decrement).clamp(0.0, MAX_TIME_SCALE);
    }

    pub fn pause(&mut self) {
        self.scale = 0.0;
    }
}

/// Push the scale into the virtual clock when it changes.
fn apply_time_scale(scale: Res<TimeScale>, mut time: ResMut<Time<Virtual>>) {
    if !scale.is_changed() {
        return;
    }
    if scale.is_paused() {
        time.pause();
    } else {
        time.unpause();
        time.set_relative_speed(scale.get());
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_speed_up_ramp() {
        let mut scale = TimeScale::default();
        // 2^1 / 10 = 0.2
        scale.speed_up();
        assert_relative_eq!(scale.get(), 1.2, epsilon = 1e-6);
        // 2^1 / 10 again, integer part still 1
        scale.speed_up();
        assert_relative_eq!(scale.get(), 1.4, epsilon = 1e-6);

        let mut fast = TimeScale::new(6.0);
        // 2^6 / 10 = 6.4, clamped to 2
        fast.speed_up();
        assert_relative_eq!(fast.get(), 8.0);
    }

    #[test]
    fn test_slow_down_stops_at_zero() {
        let mut scale = TimeScale::new(0.05);
        scale.slow_down();
        assert_eq!(scale.get(), 0.0);
        assert!(scale.is_paused());
        scale.slow_down();
        assert_eq!(scale.get(), 0.0);
    }

    #[test]
    fn test_slow_down_ramp() {
        let mut scale = TimeScale::new(3.0);
        // 2^2 / 10 = 0.4
        scale.slow_down();
        assert_relative_eq!(scale.get(), 2.6, epsilon = 1e-6);
    }

    #[test]
    fn test_new_clamps() {
        assert_eq!(TimeScale::new(-3.0).get(), 0.0);
        assert_eq!(TimeScale::new(5000.0).get(), MAX_TIME_SCALE);
    }

    #[test]
    fn test_virtual_clock_follows_scale() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins).add_plugins(TimePlugin);
        app.insert_resource(TimeScale::new(4.0));
        app.update();
        assert_relative_eq!(app.world().resource::<Time<Virtual>>().relative_speed(), 4.0);

        app.world_mut().resource_mut::<TimeScale>().pause();
        app.update();
        assert!(app.world().resource::<Time<Virtual>>().is_paused());
    }
}
