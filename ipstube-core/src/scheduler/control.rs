//! Control loop driving the clock face
//!
//! Each iteration:
//! 1. Applies the night dimming schedule when the hour changes
//! 2. Refreshes the six digits, seconds first, unless external content is
//!    on screen
//! 3. Prefetches the predicted next asset if time is left
//! 4. Runs background polling if time is still left

use core::mem;

use heapless::String;

use crate::config::{ClockConfig, DimmingConfig, GraphicClampPolicy, LoopTiming};
use crate::render::{ClockDigits, DigitRenderer, DigitSlot, DrawMode};
use crate::state::DisplayMode;
use crate::traits::{AssetStore, BackgroundWork, DrawSurface, Monotonic, PanelPower, PanelSelect};

use super::budget::IterationBudget;

/// Longest spectrum lyric remembered for change detection
pub const MAX_LYRIC_LEN: usize = 64;

/// What one iteration did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IterationReport {
    /// Time spent in the iteration
    pub elapsed_ms: u32,
    /// A prefetch decode happened
    pub prefetched: bool,
    /// Background work got to run
    pub background_ran: bool,
    /// The iteration finished inside its budget
    pub within_budget: bool,
    /// Suggested idle time before the next iteration
    pub sleep_ms: u32,
}

/// Cooperative scheduler owning the renderer
pub struct ControlLoop<'b, S, P, W, D>
where
    S: AssetStore,
{
    pub(super) renderer: DigitRenderer<'b, S, P, W, D>,
    pub(super) mode: DisplayMode,
    timing: LoopTiming,
    dimming: DimmingConfig,
    pub(super) clamp: GraphicClampPolicy,
    pub(super) sensor_sets: [u8; 3],
    last_hour: Option<u8>,
    pub(super) force_redraw: bool,
    pub(super) last_lyric: String<MAX_LYRIC_LEN>,
}

impl<'b, S, P, W, D> ControlLoop<'b, S, P, W, D>
where
    S: AssetStore,
    P: PanelSelect,
    W: PanelPower,
    D: DrawSurface,
{
    /// Create a control loop
    ///
    /// # Arguments
    ///
    /// * `renderer` - Renderer built from the same `config`
    /// * `config` - Board configuration; scheduling fields are copied out
    pub fn new(renderer: DigitRenderer<'b, S, P, W, D>, config: &ClockConfig) -> Self {
        Self {
            renderer,
            mode: DisplayMode::default(),
            timing: config.timing,
            dimming: config.dimming,
            clamp: config.graphic_clamp,
            sensor_sets: config.sensor_graphic_sets,
            last_hour: None,
            force_redraw: true,
            last_lyric: String::new(),
        }
    }

    /// Start the renderer; returns the number of graphic sets found
    pub fn begin(&mut self) -> u8 {
        let faces = self.renderer.begin();
        self.force_redraw = true;
        faces
    }

    /// Run one iteration
    ///
    /// # Arguments
    ///
    /// * `clock` - Millisecond time source for budgeting
    /// * `digits` - Current clock digits
    /// * `hour` - Current hour, 0 to 23, for the dimming schedule
    /// * `background` - Work to run in leftover time
    pub fn iterate<C, B>(
        &mut self,
        clock: &C,
        digits: &ClockDigits,
        hour: u8,
        background: &mut B,
    ) -> IterationReport
    where
        C: Monotonic + ?Sized,
        B: BackgroundWork + ?Sized,
    {
        let budget = IterationBudget::start(clock, &self.timing);

        if self.last_hour != Some(hour) {
            self.last_hour = Some(hour);
            self.renderer.set_dimming(self.dimming.level_for_hour(hour));
            self.force_redraw = true;
        }

        if self.mode.shows_clock() {
            let mode = if mem::take(&mut self.force_redraw) {
                DrawMode::Force
            } else {
                DrawMode::IfChanged
            };
            self.update_clock_display(digits, mode);
        }

        let mut prefetched = false;
        if budget.has_slack(clock) {
            prefetched = self.renderer.prefetch();
        }

        let mut background_ran = false;
        if budget.has_slack(clock) {
            let outcome = background.run();
            background_ran = true;
            if let Some(reading) = outcome.temperature {
                self.renderer.set_temperature(Some(reading));
                if self.mode.shows_clock() {
                    self.redraw_slot(DigitSlot::HoursOnes);
                }
            }
        }

        let elapsed_ms = budget.elapsed(clock);
        let within_budget = elapsed_ms <= budget.budget_ms();
        if !within_budget {
            debug!("Loop iteration overran: {} ms of {} ms", elapsed_ms, budget.budget_ms());
        }

        IterationReport {
            elapsed_ms,
            prefetched,
            background_ran,
            within_budget,
            sleep_ms: budget.remaining(clock),
        }
    }

    /// Apply all six digits in draw order
    pub fn update_clock_display(&mut self, digits: &ClockDigits, mode: DrawMode) {
        for slot in DigitSlot::DRAW_ORDER {
            self.renderer.set_digit(slot, digits.get(slot), mode);
        }
    }

    pub(super) fn redraw_slot(&mut self, slot: DigitSlot) {
        if let Some(value) = self.renderer.last_value(slot) {
            self.renderer.set_digit(slot, value, DrawMode::Force);
        }
    }

    /// Redraw every digit on the next iteration
    pub fn request_redraw(&mut self) {
        self.force_redraw = true;
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn renderer(&self) -> &DigitRenderer<'b, S, P, W, D> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut DigitRenderer<'b, S, P, W, D> {
        &mut self.renderer
    }
}
