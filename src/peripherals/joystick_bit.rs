//! joystick_bit.rs — Joystick:Bit V2 driver over any 10-bit analog reader

use crate::{
    ADC_MAX, AnalogDirection, Axis, ButtonLadder, ButtonMatch, CompassDirection, DigitalDirection,
    JoystickClassifier, JoystickConfig, LadderButton,
};

/// Analog pins used by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogChannel {
    /// Stick X axis.
    P0,
    /// Stick Y axis.
    P1,
    /// Button ladder.
    P2,
}

/// Source of raw analog samples, 0..=1023.
///
/// Implement this over the HAL's ADC. Readings above 1023 are clamped by the
/// driver.
pub trait AnalogReader {
    type Error;

    fn read(&mut self, channel: AnalogChannel) -> Result<u16, Self::Error>;
}

impl<T: AnalogReader + ?Sized> AnalogReader for &mut T {
    type Error = T::Error;

    fn read(&mut self, channel: AnalogChannel) -> Result<u16, Self::Error> {
        (**self).read(channel)
    }
}

/// One reading of all three channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickSample {
    pub x: u16,
    pub y: u16,
    pub buttons: u16,
}

/// Stick and button panel driver.
///
/// Every query reads the pins it needs at call time. If a read fails the
/// query returns its neutral value (0, `false`, Centre or `None`) so a
/// polling loop can carry on; [`sample`](Self::sample) and
/// [`calibrate`](Self::calibrate) surface the error instead.
pub struct JoystickBit<R> {
    reader: R,
    joystick: JoystickClassifier,
    buttons: ButtonLadder,
}

impl<R> JoystickBit<R>
where
    R: AnalogReader,
{
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, JoystickConfig::elecfreaks_joystick_bit_v2())
    }

    pub fn with_config(reader: R, config: &JoystickConfig) -> Self {
        Self {
            reader,
            joystick: JoystickClassifier::from_config(config),
            buttons: ButtonLadder::from_config(config),
        }
    }

    pub fn joystick(&self) -> &JoystickClassifier {
        &self.joystick
    }

    pub fn joystick_mut(&mut self) -> &mut JoystickClassifier {
        &mut self.joystick
    }

    pub fn buttons(&self) -> &ButtonLadder {
        &self.buttons
    }

    pub fn buttons_mut(&mut self) -> &mut ButtonLadder {
        &mut self.buttons
    }

    pub fn config(&self) -> JoystickConfig {
        self.joystick.config(self.buttons.policy())
    }

    pub fn set_button_match(&mut self, policy: ButtonMatch) {
        self.buttons.set_policy(policy);
    }

    pub fn release(self) -> R {
        self.reader
    }

    pub fn sample(&mut self) -> Result<JoystickSample, R::Error> {
        let (x, y) = self.read_stick()?;
        let buttons = self.read_channel(AnalogChannel::P2)?;
        Ok(JoystickSample { x, y, buttons })
    }

    /// Use the current stick position as center. Leave the stick alone while
    /// this runs. On a read error the previous calibration is kept.
    pub fn calibrate(&mut self) -> Result<(), R::Error> {
        let (x, y) = self.read_stick()?;
        self.joystick.calibrate(x, y);
        Ok(())
    }

    pub fn raw_value(&mut self, axis: Axis) -> u16 {
        self.with_stick(0, |joystick, x, y| joystick.raw_value(axis, x, y))
    }

    pub fn offset_value(&mut self, axis: Axis) -> i32 {
        self.with_stick(0, |joystick, x, y| joystick.offset_value(axis, x, y))
    }

    pub fn is_pointing(&mut self, direction: AnalogDirection) -> bool {
        self.with_stick(false, |joystick, x, y| joystick.is_pointing(direction, x, y))
    }

    pub fn digital_direction(&mut self) -> DigitalDirection {
        self.with_stick(DigitalDirection::Centre, |joystick, x, y| {
            joystick.classify_digital(x, y)
        })
    }

    pub fn compass_direction(&mut self) -> Option<CompassDirection> {
        self.digital_direction().to_compass()
    }

    pub fn is_button_active(&mut self, button: LadderButton) -> bool {
        match self.read_channel(AnalogChannel::P2) {
            Ok(raw) => self.buttons.is_active(button, raw),
            Err(_) => false,
        }
    }

    pub fn pressed_button(&mut self) -> Option<LadderButton> {
        let raw = self.read_channel(AnalogChannel::P2).ok()?;
        self.buttons.identify(raw)
    }

    fn with_stick<T>(
        &mut self,
        fallback: T,
        f: impl FnOnce(&JoystickClassifier, u16, u16) -> T,
    ) -> T {
        match self.read_stick() {
            Ok((x, y)) => f(&self.joystick, x, y),
            Err(_) => fallback,
        }
    }

    fn read_stick(&mut self) -> Result<(u16, u16), R::Error> {
        let x = self.read_channel(AnalogChannel::P0)?;
        let y = self.read_channel(AnalogChannel::P1)?;
        Ok((x, y))
    }

    fn read_channel(&mut self, channel: AnalogChannel) -> Result<u16, R::Error> {
        match self.reader.read(channel) {
            Ok(raw) => Ok(raw.min(ADC_MAX)),
            Err(err) => {
                warn!("analog read failed on {}", channel);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedReader {
        x: u16,
        y: u16,
        p2: u16,
        reads: usize,
    }

    impl FixedReader {
        fn new(x: u16, y: u16, p2: u16) -> Self {
            Self { x, y, p2, reads: 0 }
        }
    }

    impl AnalogReader for FixedReader {
        type Error = ();

        fn read(&mut self, channel: AnalogChannel) -> Result<u16, ()> {
            self.reads += 1;
            Ok(match channel {
                AnalogChannel::P0 => self.x,
                AnalogChannel::P1 => self.y,
                AnalogChannel::P2 => self.p2,
            })
        }
    }

    #[derive(Debug, PartialEq)]
    struct ReadFailed;

    struct BrokenReader {
        broken: Option<AnalogChannel>,
    }

    impl AnalogReader for BrokenReader {
        type Error = ReadFailed;

        fn read(&mut self, channel: AnalogChannel) -> Result<u16, ReadFailed> {
            if self.broken == Some(channel) {
                Err(ReadFailed)
            } else {
                Ok(900)
            }
        }
    }

    #[test]
    fn sample_reads_all_channels() {
        let mut board = JoystickBit::new(FixedReader::new(10, 20, 686));
        assert_eq!(
            board.sample(),
            Ok(JoystickSample {
                x: 10,
                y: 20,
                buttons: 686
            })
        );
        assert_eq!(board.release().reads, 3);
    }

    #[test]
    fn readings_are_clamped() {
        let mut board = JoystickBit::new(FixedReader::new(4095, 2000, 5000));
        let sample = board.sample().unwrap();
        assert_eq!(sample.x, 1023);
        assert_eq!(sample.y, 1023);
        assert_eq!(sample.buttons, 1023);
    }

    #[test]
    fn calibrate_uses_current_position() {
        let mut reader = FixedReader::new(530, 512, 0);
        let mut board = JoystickBit::new(&mut reader);
        board.calibrate().unwrap();
        assert_eq!(board.joystick().center(Axis::X), 530);
        assert_eq!(board.joystick().center(Axis::Y), 512);
        assert_eq!(board.offset_value(Axis::X), 0);
        assert!(board.is_pointing(AnalogDirection::Centre));
        drop(board);

        reader.x = 1000;
        let mut board = JoystickBit::new(&mut reader);
        assert_eq!(board.offset_value(Axis::X), 1000 - 522);
        assert_eq!(board.raw_value(Axis::Y), 512);
    }

    #[test]
    fn directions_delegate_to_classifier() {
        let mut board = JoystickBit::new(FixedReader::new(300, 700, 0));
        assert_eq!(board.digital_direction(), DigitalDirection::TopLeft);
        assert_eq!(board.compass_direction(), Some(CompassDirection::NorthWest));
        assert!(board.is_pointing(AnalogDirection::Left));
        assert!(board.is_pointing(AnalogDirection::Top));
        assert!(!board.is_pointing(AnalogDirection::Centre));
    }

    #[test]
    fn buttons_follow_policy() {
        let mut board = JoystickBit::new(FixedReader::new(522, 522, 687));
        assert!(board.is_button_active(LadderButton::C));
        assert_eq!(board.pressed_button(), Some(LadderButton::C));

        board.set_button_match(ButtonMatch::Exact);
        assert!(!board.is_button_active(LadderButton::C));
        assert_eq!(board.pressed_button(), None);
        assert_eq!(board.config().button_match, ButtonMatch::Exact);
    }

    #[test]
    fn with_config_sets_calibration() {
        let config = JoystickConfig {
            center_x: 600,
            center_y: 400,
            tolerance: 30,
            button_match: ButtonMatch::Tolerant { give: 5 },
        };
        let mut board = JoystickBit::with_config(FixedReader::new(625, 420, 776), &config);
        assert!(board.is_pointing(AnalogDirection::Centre));
        assert!(board.is_button_active(LadderButton::D));
        assert_eq!(board.config(), config);
    }

    #[test]
    fn failed_reads_degrade_to_neutral_values() {
        let mut board = JoystickBit::new(BrokenReader {
            broken: Some(AnalogChannel::P1),
        });
        assert_eq!(board.raw_value(Axis::X), 0);
        assert_eq!(board.offset_value(Axis::X), 0);
        assert!(!board.is_pointing(AnalogDirection::Right));
        assert_eq!(board.digital_direction(), DigitalDirection::Centre);
        assert_eq!(board.compass_direction(), None);
        assert_eq!(board.sample(), Err(ReadFailed));

        // P2 still works
        assert!(!board.is_button_active(LadderButton::A));
        assert_eq!(board.pressed_button(), None);
    }

    #[test]
    fn failed_calibration_keeps_previous_center() {
        let mut board = JoystickBit::new(BrokenReader {
            broken: Some(AnalogChannel::P0),
        });
        assert_eq!(board.calibrate(), Err(ReadFailed));
        assert_eq!(board.joystick().center(Axis::X), 522);
        assert_eq!(board.joystick().center(Axis::Y), 522);

        let mut board = JoystickBit::new(BrokenReader {
            broken: Some(AnalogChannel::P2),
        });
        assert!(!board.is_button_active(LadderButton::E));
        assert!(board.calibrate().is_ok());
        assert_eq!(board.joystick().center(Axis::X), 900);
    }

    #[test]
    fn tolerance_is_adjustable_through_driver() {
        let mut board = JoystickBit::new(FixedReader::new(540, 522, 0));
        assert!(board.is_pointing(AnalogDirection::Right));
        board.joystick_mut().set_tolerance(20);
        assert!(board.is_pointing(AnalogDirection::Centre));
        board.joystick_mut().set_tolerance(5000);
        assert_eq!(board.joystick().tolerance(), 20);
        assert_eq!(board.buttons().policy(), ButtonMatch::DEFAULT);
        board.buttons_mut().set_policy(ButtonMatch::Exact);
        assert_eq!(board.buttons().policy(), ButtonMatch::Exact);
    }
}
