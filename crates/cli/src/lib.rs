// archdecide CLI library: pieces the binary and its tests share.

pub mod input;
pub mod interactive;
