//! LED matrix facade
//!
//! Owns the framebuffer, the pulse emitter for the data line and the delay
//! used for the post-frame settle. This is the surface the firmware drives:
//! paint with `clear` / `fill` / `set_xy` / `draw_value`, then `transmit`.

use airglow_hal::PulseEmitter;
use embedded_hal_async::delay::DelayNs;

use crate::color::Color;
use crate::config::MatrixConfig;
use crate::font::Glyph;
use crate::framebuffer::{Framebuffer, FramebufferError};
use crate::render::{self, Align, RenderError, Value};
use crate::wire::{pulse_train, TimingError, WireTiming};

/// Matrix errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatrixError<E> {
    /// Dimensions rejected by the framebuffer
    Framebuffer(FramebufferError),
    /// Unusable wire timing
    Timing(TimingError),
    /// The emitter failed
    Emitter(E),
}

impl<E> From<FramebufferError> for MatrixError<E> {
    fn from(e: FramebufferError) -> Self {
        MatrixError::Framebuffer(e)
    }
}

impl<E> From<TimingError> for MatrixError<E> {
    fn from(e: TimingError) -> Self {
        MatrixError::Timing(e)
    }
}

/// A rectangular LED matrix on a single data line
pub struct Matrix<E, D> {
    framebuffer: Framebuffer,
    emitter: E,
    delay: D,
    timing: WireTiming,
    data_pin: u8,
    frames_sent: u32,
}

impl<E, D> Matrix<E, D>
where
    E: PulseEmitter,
    D: DelayNs,
{
    /// Create a matrix driven by an already initialized emitter
    ///
    /// Claiming the data pin happens when the emitter is built; by the time
    /// this runs the hardware is known to be available.
    pub fn new(
        config: &MatrixConfig,
        timing: WireTiming,
        emitter: E,
        delay: D,
    ) -> Result<Self, MatrixError<E::Error>> {
        timing.validate()?;
        let framebuffer = Framebuffer::new(config.width, config.height)?;

        Ok(Self {
            framebuffer,
            emitter,
            delay,
            timing,
            data_pin: config.data_pin,
            frames_sent: 0,
        })
    }

    pub fn width(&self) -> u16 {
        self.framebuffer.width()
    }

    pub fn height(&self) -> u16 {
        self.framebuffer.height()
    }

    /// GPIO number of the data line
    pub fn data_pin(&self) -> u8 {
        self.data_pin
    }

    pub fn timing(&self) -> &WireTiming {
        &self.timing
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    /// Frames transmitted since construction
    pub fn frames_sent(&self) -> u32 {
        self.frames_sent
    }

    pub fn clear(&mut self) {
        self.framebuffer.clear();
    }

    pub fn fill(&mut self, color: Color) {
        self.framebuffer.fill(color);
    }

    pub fn set(&mut self, index: i32, color: Color) {
        self.framebuffer.set(index, color);
    }

    pub fn set_xy(&mut self, x: i32, y: i32, color: Color) {
        self.framebuffer.set_xy(x, y, color);
    }

    pub fn draw_glyph(&mut self, glyph: &Glyph, x: i32, color: Color) {
        self.framebuffer.draw_glyph(glyph, x, color);
    }

    pub fn can_render(&self, value: Value<'_>) -> bool {
        render::can_render(value)
    }

    pub fn draw_value(
        &mut self,
        value: Value<'_>,
        color: Color,
        align: Align,
        show_sign: bool,
    ) -> Result<(), RenderError> {
        self.framebuffer.draw_value(value, color, align, show_sign)
    }

    /// Send the framebuffer down the chain and wait out the settle interval
    ///
    /// Returns only after the line has been low for `settle_ms`, so two
    /// back-to-back calls can never corrupt each other.
    pub async fn transmit(&mut self) -> Result<(), MatrixError<E::Error>> {
        let train = pulse_train(self.framebuffer.pixels(), self.timing);
        self.emitter.emit(train).map_err(MatrixError::Emitter)?;
        self.delay.delay_ms(self.timing.settle_ms).await;
        self.frames_sent = self.frames_sent.wrapping_add(1);
        Ok(())
    }
}
