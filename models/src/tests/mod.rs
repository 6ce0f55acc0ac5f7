mod listening_ports;
mod process_info;
