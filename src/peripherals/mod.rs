mod button_ladder;
mod joystick;
mod joystick_bit;

pub use button_ladder::*;
pub use joystick::*;
pub use joystick_bit::*;
