mod helpers;
mod session;
mod shell;
