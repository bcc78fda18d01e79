//! Backdrop state
//!
//! The only state that survives between frames: whether a contact is down,
//! and how far the green channel has climbed while it was.

/// Number of green steps per full channel (one step is 0.01)
pub const GREEN_STEPS_PER_CHANNEL: u32 = 100;

/// Phase of a touch contact as seen by the backdrop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// A contact went down
    Begin,
    /// A contact moved while down
    Move,
    /// The last contact was lifted (or cancelled)
    End,
}

/// RGBA color used to clear the frame before drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ClearColor {
    /// Opaque red, painted while nothing touches the screen
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque color with only the green channel set
    pub const fn green(level: f32) -> Self {
        Self::rgb(0.0, level, 0.0)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Touch flag and green accumulator driving the background color
///
/// The green level is kept as a count of hundredths so that a hundred
/// touching frames land exactly on 1.0 and the next one wraps to 0.
#[derive(Debug, Clone, Default)]
pub struct Backdrop {
    touching: bool,
    green_steps: u32,
}

impl Backdrop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the latest touch event
    pub fn touch(&mut self, phase: TouchPhase) {
        self.touching = match phase {
            TouchPhase::Begin | TouchPhase::Move => true,
            TouchPhase::End => false,
        };
    }

    /// Returns true while at least one contact is down
    pub fn is_touching(&self) -> bool {
        self.touching
    }

    /// Current green level in `[0, 1]`
    pub fn green_level(&self) -> f32 {
        self.green_steps as f32 / GREEN_STEPS_PER_CHANNEL as f32
    }

    /// Advances the state by one painted frame and returns its clear color
    ///
    /// While touching, green climbs one step and wraps to 0 once it would
    /// exceed a full channel. Otherwise green resets and the frame is red.
    pub fn next_clear_color(&mut self) -> ClearColor {
        if self.touching {
            self.green_steps += 1;
            if self.green_steps > GREEN_STEPS_PER_CHANNEL {
                self.green_steps = 0;
            }
            ClearColor::green(self.green_level())
        } else {
            self.green_steps = 0;
            ClearColor::RED
        }
    }
}
