mod command;
mod diagnostics;
mod ports;
mod process_info;
