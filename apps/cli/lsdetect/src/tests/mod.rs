mod logger;
mod report;
