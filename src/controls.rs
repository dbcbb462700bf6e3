//! Keyboard-driven debug panel over the camera transform.
//!
//! Six entries (translate x/y/z, rotate x/y/z), each with a range and a step.
//! Values are clamped to the range and snapped to the step on every write.
//! The panel never touches the noise pipeline.

use crate::camera::Camera;
use crate::params::PanelParams;

/// Numeric range with step granularity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamRange {
    pub fn new((min, max, step): (f32, f32, f32)) -> Self {
        Self { min, max, step }
    }

    /// Clamp to [min, max], then snap to a multiple of `step`
    pub fn apply(&self, value: f32) -> f32 {
        let v = value.max(self.min).min(self.max);
        if self.step > 0.0 && v % self.step != 0.0 {
            (v / self.step).round() * self.step
        } else {
            v
        }
    }
}

/// Camera component an entry edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraField {
    TranslateX,
    TranslateY,
    TranslateZ,
    RotateX,
    RotateY,
    RotateZ,
}

impl CameraField {
    pub fn label(self) -> &'static str {
        match self {
            CameraField::TranslateX => "camera/translate/x",
            CameraField::TranslateY => "camera/translate/y",
            CameraField::TranslateZ => "camera/translate/z",
            CameraField::RotateX => "camera/rotate/x",
            CameraField::RotateY => "camera/rotate/y",
            CameraField::RotateZ => "camera/rotate/z",
        }
    }

    pub fn get(self, camera: &Camera) -> f32 {
        match self {
            CameraField::TranslateX => camera.position.x,
            CameraField::TranslateY => camera.position.y,
            CameraField::TranslateZ => camera.position.z,
            CameraField::RotateX => camera.rotation.x,
            CameraField::RotateY => camera.rotation.y,
            CameraField::RotateZ => camera.rotation.z,
        }
    }

    fn slot(self, camera: &mut Camera) -> &mut f32 {
        match self {
            CameraField::TranslateX => &mut camera.position.x,
            CameraField::TranslateY => &mut camera.position.y,
            CameraField::TranslateZ => &mut camera.position.z,
            CameraField::RotateX => &mut camera.rotation.x,
            CameraField::RotateY => &mut camera.rotation.y,
            CameraField::RotateZ => &mut camera.rotation.z,
        }
    }
}

/// One adjustable value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlEntry {
    pub field: CameraField,
    pub range: ParamRange,
}

/// Panel input, decoupled from the windowing layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCommand {
    SelectNext,
    SelectPrevious,
    Increase,
    Decrease,
}

pub struct ControlPanel {
    entries: Vec<ControlEntry>,
    selected: usize,
    coarse_multiplier: f32,
}

impl ControlPanel {
    pub fn new(params: &PanelParams) -> Self {
        let xy = ParamRange::new(params.translate_xy);
        let z = ParamRange::new(params.translate_z);
        let rot = ParamRange::new(params.rotate);

        let entries = vec![
            ControlEntry { field: CameraField::TranslateX, range: xy },
            ControlEntry { field: CameraField::TranslateY, range: xy },
            ControlEntry { field: CameraField::TranslateZ, range: z },
            ControlEntry { field: CameraField::RotateX, range: rot },
            ControlEntry { field: CameraField::RotateY, range: rot },
            ControlEntry { field: CameraField::RotateZ, range: rot },
        ];

        Self {
            entries,
            selected: 0,
            coarse_multiplier: params.coarse_multiplier,
        }
    }

    pub fn entries(&self) -> &[ControlEntry] {
        &self.entries
    }

    pub fn selected(&self) -> ControlEntry {
        self.entries[self.selected]
    }

    /// Write `value` into the entry for `field`, clamped and snapped
    ///
    /// Returns the stored value, or `None` if the panel has no such entry.
    pub fn set(&self, camera: &mut Camera, field: CameraField, value: f32) -> Option<f32> {
        let entry = self.entries.iter().find(|e| e.field == field)?;
        let stored = entry.range.apply(value);
        *field.slot(camera) = stored;
        Some(stored)
    }

    /// Apply a command; returns the selected entry and its value afterwards
    pub fn apply(
        &mut self,
        command: PanelCommand,
        coarse: bool,
        camera: &mut Camera,
    ) -> (CameraField, f32) {
        let len = self.entries.len();
        match command {
            PanelCommand::SelectNext => self.selected = (self.selected + 1) % len,
            PanelCommand::SelectPrevious => self.selected = (self.selected + len - 1) % len,
            PanelCommand::Increase | PanelCommand::Decrease => {
                let entry = self.selected();
                let sign = if command == PanelCommand::Increase { 1.0 } else { -1.0 };
                let multiplier = if coarse { self.coarse_multiplier } else { 1.0 };
                let current = entry.field.get(camera);
                let target = current + sign * multiplier * entry.range.step;
                *entry.field.slot(camera) = entry.range.apply(target);
            }
        }

        let entry = self.selected();
        let value = entry.field.get(camera);
        log::info!(
            "{} = {:.4} [{} .. {}, step {}]",
            entry.field.label(),
            value,
            entry.range.min,
            entry.range.max,
            entry.range.step
        );
        (entry.field, value)
    }
}
