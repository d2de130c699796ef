//! The hosting application object handed to constructor adapters.

/// How the logical canvas is fitted into the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMode {
    #[default]
    NoScale,
    Center,
    PixelPerfect,
    LetterBox,
    Crop,
    Stretch,
    FitWidth,
    FitHeight,
}

/// Device orientation the project is laid out for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
}

impl Orientation {
    pub fn is_landscape(self) -> bool {
        matches!(self, Orientation::LandscapeLeft | Orientation::LandscapeRight)
    }
}

/// Project settings the host application is started with.
///
/// Logical dimensions are always given in portrait orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub logical_width: u32,
    pub logical_height: u32,
    pub scale_mode: ScaleMode,
    pub orientation: Orientation,
    pub fps: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            logical_width: 320,
            logical_height: 480,
            scale_mode: ScaleMode::NoScale,
            orientation: Orientation::Portrait,
            fps: 60,
        }
    }
}

impl AppSettings {
    pub fn with_logical_size(mut self, width: u32, height: u32) -> Self {
        self.logical_width = width;
        self.logical_height = height;
        self
    }

    pub fn with_scale_mode(mut self, scale_mode: ScaleMode) -> Self {
        self.scale_mode = scale_mode;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }
}

/// The running application that native scene objects are created against.
#[derive(Debug, Clone, Default)]
pub struct Application {
    settings: AppSettings,
}

impl Application {
    pub fn new(settings: AppSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Logical canvas size in the current orientation.
    pub fn content_size(&self) -> (u32, u32) {
        let AppSettings {
            logical_width,
            logical_height,
            orientation,
            ..
        } = self.settings;
        if orientation.is_landscape() {
            (logical_height, logical_width)
        } else {
            (logical_width, logical_height)
        }
    }
}
