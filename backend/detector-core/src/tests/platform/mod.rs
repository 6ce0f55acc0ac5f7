mod flags;
mod windows;
