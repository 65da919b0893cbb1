mod use_resizable;

pub use use_resizable::*;
