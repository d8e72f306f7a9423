/// Errors produced by the strict (validating) side of the API.
///
/// The default surface never returns these: unknown codes degrade to a
/// sentinel and out-of-range tolerances are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JoystickError {
    #[error("Unknown joystick axis code: {0}")]
    InvalidAxis(u8),
    #[error("Unknown analog direction code: {0}")]
    InvalidAnalogDirection(u8),
    #[error("Unknown digital direction code: {0}")]
    InvalidDigitalDirection(u8),
    #[error("Unknown ladder button value: {0}")]
    InvalidButton(u16),
    #[error("Tolerance out of range: {0} not in 0..=1023")]
    ToleranceOutOfRange(i32),
}
