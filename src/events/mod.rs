pub mod keyboard;
pub mod pointer;
pub mod shortcuts;
pub mod window;
