pub mod about;
pub mod counter;
pub mod menu;

pub use about::AboutScreen;
pub use counter::CounterScreen;
pub use menu::MenuScreen;
