use kpwatch::initialization::init;
use kpwatch::worker;

fn main() {
    match init() {
        Ok((config, service)) => worker::run(&config, &service),
        Err(e) => println!("{}", e),
    }
}
