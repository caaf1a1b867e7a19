mod chrono;
mod std;
