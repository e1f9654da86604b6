// controls.rs - Boundary between the user-facing controls and the simulation

use crate::error::LifeError;
use crate::render::CellLayout;
use crate::simulation::{Intent, SimulationState};

/// Parse a dimension form field. Surrounding whitespace is ignored.
pub fn parse_dimension(field: &str) -> Result<i64, LifeError> {
    field
        .trim()
        .parse::<i64>()
        .map_err(|_| LifeError::UnparsableDimension {
            field: field.to_owned(),
        })
}

/// Parse both dimension fields into an initialize intent.
pub fn initialize_intent(width: &str, height: &str) -> Result<Intent, LifeError> {
    let width = parse_dimension(width)?;
    let height = parse_dimension(height)?;
    if width <= 0 || height <= 0 {
        return Err(LifeError::InvalidDimension { width, height });
    }
    Ok(Intent::Initialize { width, height })
}

/// Toggle intent for a click at canvas-relative pixel coordinates.
pub fn toggle_intent(layout: &CellLayout, px: f32, py: f32) -> Intent {
    let (x, y) = layout.cell_at(px, py);
    Intent::ToggleCell { x, y }
}

/// Which affordances the controls should offer for the current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlsView {
    pub run_label: &'static str,
    pub run_enabled: bool,
    /// Width/height fields and the initialize button
    pub settings_enabled: bool,
    pub step_enabled: bool,
    pub random_reseed_checked: bool,
}

impl ControlsView {
    pub fn from_state(state: &SimulationState) -> Self {
        let running = state.is_running;
        Self {
            run_label: if running { "Stop Game" } else { "Start Game" },
            run_enabled: true,
            settings_enabled: !running,
            step_enabled: !running,
            random_reseed_checked: state.is_random_reseed_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_integers() {
        assert_eq!(parse_dimension(" 42 "), Ok(42));
        assert_eq!(parse_dimension("-3"), Ok(-3));
        assert!(matches!(
            parse_dimension("ten"),
            Err(LifeError::UnparsableDimension { .. })
        ));
    }

    #[test]
    fn initialize_intent_validates_sign() {
        assert_eq!(
            initialize_intent("20", "10"),
            Ok(Intent::Initialize { width: 20, height: 10 })
        );
        assert_eq!(
            initialize_intent("0", "10"),
            Err(LifeError::InvalidDimension { width: 0, height: 10 })
        );
    }

    #[test]
    fn click_maps_to_cell() {
        let layout = CellLayout::default();
        assert_eq!(toggle_intent(&layout, 25.0, 9.9), Intent::ToggleCell { x: 2, y: 0 });
    }

    #[test]
    fn view_follows_run_state() {
        let mut state = SimulationState::default();
        let stopped = ControlsView::from_state(&state);
        assert_eq!(stopped.run_label, "Start Game");
        assert!(stopped.settings_enabled && stopped.step_enabled);

        state.is_running = true;
        state.is_random_reseed_mode = true;
        let running = ControlsView::from_state(&state);
        assert_eq!(running.run_label, "Stop Game");
        assert!(!running.settings_enabled && !running.step_enabled);
        assert!(running.random_reseed_checked);
    }
}
