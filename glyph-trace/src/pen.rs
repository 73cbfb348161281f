use skrifa::outline::OutlinePen;
use trace_path::{Path, PathCommand};

/// Pen that records an outline as path commands in font units.
///
/// Coordinates are kept exactly as the scaler emits them, so the result is
/// Y-up with the baseline at zero.
#[derive(Clone, Debug, Default)]
pub struct PathPen {
    path: Path,
}

impl PathPen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> Path {
        self.path
    }
}

impl OutlinePen for PathPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.push(PathCommand::move_to(x.into(), y.into()));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.push(PathCommand::line_to(x.into(), y.into()));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.path.push(PathCommand::quad_to(
            cx0.into(),
            cy0.into(),
            x.into(),
            y.into(),
        ));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.path.push(PathCommand::curve_to(
            cx0.into(),
            cy0.into(),
            cx1.into(),
            cy1.into(),
            x.into(),
            y.into(),
        ));
    }

    fn close(&mut self) {
        self.path.push(PathCommand::close());
    }
}
