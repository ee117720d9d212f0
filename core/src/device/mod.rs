pub mod joypad;
pub mod mbc1;
pub mod ppu;
pub mod timer;

pub use joypad::Joypad;
pub use mbc1::Mbc1;
pub use ppu::Ppu;
pub use timer::Timer;
