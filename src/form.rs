//! Converter form state and its field bindings
//!
//! Every bindable field has at most one handler. A handler reads the form
//! after its source field changed and returns the value for exactly one
//! destination field, or `None` to leave the destination alone. Writing the
//! destination does not fire the destination's own handler.

use tracing::{trace, warn};

use crate::export::ExportRequest;
use crate::models::{
    sync_duration_from_fps, sync_fps_from_duration, LoopMode, DEFAULT_DURATION_MS, DEFAULT_FPS,
};

/// 表单字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Rows,
    Cols,
    Fps,
    DurationMs,
    Loop,
}

/// A value read from or written to a form field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Count(u32),
    Rate(Option<f64>),
    Millis(Option<u32>),
    Flag(bool),
}

pub type Handler = fn(&SpriteForm) -> Option<FieldValue>;

#[derive(Clone, Copy)]
struct Binding {
    source: FormField,
    target: FormField,
    handler: Handler,
}

/// Registered field-change handlers
#[derive(Clone, Default)]
pub struct Bindings {
    entries: Vec<Binding>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// FPS ↔ 帧间隔 联动
    pub fn timing() -> Self {
        let mut bindings = Self::new();
        bindings.register(FormField::Fps, FormField::DurationMs, |form| {
            sync_duration_from_fps(form.fps).map(|ms| FieldValue::Millis(Some(ms)))
        });
        bindings.register(FormField::DurationMs, FormField::Fps, |form| {
            sync_fps_from_duration(form.duration_ms).map(|fps| FieldValue::Rate(Some(fps)))
        });
        bindings
    }

    /// Registers `handler` for changes to `source`, replacing any earlier one.
    pub fn register(&mut self, source: FormField, target: FormField, handler: Handler) {
        self.entries.retain(|b| b.source != source);
        self.entries.push(Binding {
            source,
            target,
            handler,
        });
    }

    pub fn target_of(&self, source: FormField) -> Option<FormField> {
        self.find(source).map(|b| b.target)
    }

    #[inline]
    fn find(&self, source: FormField) -> Option<&Binding> {
        self.entries.iter().find(|b| b.source == source)
    }
}

impl std::fmt::Debug for Bindings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|b| (b.source, b.target)))
            .finish()
    }
}

/// 转换表单
#[derive(Debug, Clone)]
pub struct SpriteForm {
    pub rows: u32,
    pub cols: u32,
    pub fps: Option<f64>,
    pub duration_ms: Option<u32>,
    pub loop_forever: bool,
    bindings: Bindings,
}

impl Default for SpriteForm {
    fn default() -> Self {
        Self::with_bindings(Bindings::timing())
    }
}

impl SpriteForm {
    pub fn with_bindings(bindings: Bindings) -> Self {
        Self {
            rows: 1,
            cols: 4,
            fps: Some(DEFAULT_FPS),
            duration_ms: Some(DEFAULT_DURATION_MS),
            loop_forever: true,
            bindings,
        }
    }

    pub fn get(&self, field: FormField) -> FieldValue {
        match field {
            FormField::Rows => FieldValue::Count(self.rows),
            FormField::Cols => FieldValue::Count(self.cols),
            FormField::Fps => FieldValue::Rate(self.fps),
            FormField::DurationMs => FieldValue::Millis(self.duration_ms),
            FormField::Loop => FieldValue::Flag(self.loop_forever),
        }
    }

    /// Stores `value` without running any binding. Returns false when the
    /// value kind doesn't fit the field.
    fn write(&mut self, field: FormField, value: FieldValue) -> bool {
        match (field, value) {
            (FormField::Rows, FieldValue::Count(n)) => self.rows = n,
            (FormField::Cols, FieldValue::Count(n)) => self.cols = n,
            (FormField::Fps, FieldValue::Rate(fps)) => self.fps = fps,
            (FormField::DurationMs, FieldValue::Millis(ms)) => self.duration_ms = ms,
            (FormField::Loop, FieldValue::Flag(b)) => self.loop_forever = b,
            (field, value) => {
                warn!(?field, ?value, "value does not fit field");
                return false;
            }
        }
        true
    }

    /// 修改字段并触发联动
    ///
    /// Returns the destination field the binding wrote, if any.
    pub fn change(&mut self, field: FormField, value: FieldValue) -> Option<FormField> {
        if !self.write(field, value) {
            return None;
        }

        let binding = *self.bindings.find(field)?;
        let update = (binding.handler)(self)?;
        trace!(source = ?binding.source, target = ?binding.target, ?update, "binding fired");

        self.write(binding.target, update).then_some(binding.target)
    }

    pub fn set_rows(&mut self, rows: u32) {
        self.change(FormField::Rows, FieldValue::Count(rows));
    }

    pub fn set_cols(&mut self, cols: u32) {
        self.change(FormField::Cols, FieldValue::Count(cols));
    }

    pub fn set_fps(&mut self, fps: Option<f64>) -> Option<FormField> {
        self.change(FormField::Fps, FieldValue::Rate(fps))
    }

    pub fn set_duration_ms(&mut self, duration_ms: Option<u32>) -> Option<FormField> {
        self.change(FormField::DurationMs, FieldValue::Millis(duration_ms))
    }

    pub fn set_loop(&mut self, loop_forever: bool) {
        self.change(FormField::Loop, FieldValue::Flag(loop_forever));
    }

    /// Snapshot for the convert button. Only the duration travels; fps is display-only.
    pub fn request(&self) -> ExportRequest {
        ExportRequest {
            rows: self.rows,
            cols: self.cols,
            duration_ms: self.duration_ms,
            loop_mode: LoopMode::from_flag(self.loop_forever),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let form = SpriteForm::default();
        assert_eq!((form.rows, form.cols), (1, 4));
        assert_eq!(form.fps, Some(10.0));
        assert_eq!(form.duration_ms, Some(100));
        assert!(form.loop_forever);
    }

    #[test]
    fn test_fps_change_updates_duration() {
        let mut form = SpriteForm::default();

        assert_eq!(form.set_fps(Some(25.0)), Some(FormField::DurationMs));
        assert_eq!(form.duration_ms, Some(40));
        assert_eq!(form.fps, Some(25.0));
    }

    #[test]
    fn test_duration_change_updates_fps() {
        let mut form = SpriteForm::default();

        assert_eq!(form.set_duration_ms(Some(40)), Some(FormField::Fps));
        assert_eq!(form.fps, Some(25.0));
    }

    #[test]
    fn test_bad_input_keeps_previous_value() {
        let mut form = SpriteForm::default();

        assert_eq!(form.set_fps(Some(0.0)), None);
        assert_eq!(form.duration_ms, Some(100));

        assert_eq!(form.set_duration_ms(None), None);
        assert_eq!(form.fps, Some(0.0));
    }

    #[test]
    fn test_duration_is_never_rewritten_by_its_own_change() {
        let mut form = SpriteForm::default();
        for ms in 1..=1000u32 {
            form.set_duration_ms(Some(ms));
            assert_eq!(form.duration_ms, Some(ms));
        }
    }

    #[test]
    fn test_unbound_fields_fire_nothing() {
        let mut form = SpriteForm::default();
        assert_eq!(form.change(FormField::Rows, FieldValue::Count(3)), None);
        assert_eq!(form.rows, 3);
        assert_eq!(form.duration_ms, Some(100));
    }

    #[test]
    fn test_mismatched_value_is_ignored() {
        let mut form = SpriteForm::default();
        assert_eq!(form.change(FormField::Rows, FieldValue::Flag(false)), None);
        assert_eq!(form.rows, 1);
    }

    #[test]
    fn test_register_replaces_handler() {
        let mut bindings = Bindings::timing();
        bindings.register(FormField::Fps, FormField::Rows, |_| Some(FieldValue::Count(9)));

        assert_eq!(bindings.target_of(FormField::Fps), Some(FormField::Rows));
        assert_eq!(bindings.target_of(FormField::DurationMs), Some(FormField::Fps));

        let mut form = SpriteForm::with_bindings(bindings);
        form.set_fps(Some(50.0));
        assert_eq!(form.rows, 9);
        assert_eq!(form.duration_ms, Some(100));
    }

    #[test]
    fn test_request_uses_duration_not_fps() {
        let mut form = SpriteForm::default();
        form.set_rows(2);
        form.set_cols(3);
        form.set_loop(false);
        form.fps = Some(1.0);

        let req = form.request();
        assert_eq!((req.rows, req.cols), (2, 3));
        assert_eq!(req.duration_ms, Some(100));
        assert_eq!(req.loop_mode, LoopMode::Once);
    }
}
