extern crate chrono;
extern crate flexi_logger;
extern crate getopts;
extern crate reqwest;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod irishrail;
mod result;
mod sensor;
mod station;

const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

fn print_usage(program: &str, opts: &getopts::Options) {
    let brief = format!("Usage: {} -s STATION [options]", program);
    print!("{}", opts.usage(&brief));
}

fn print_sensor(sensor: &sensor::NextTrainSensor) {
    match sensor.state() {
        Some(due_in) => {
            println!("{} ({}): {} {}",
                     sensor.name(), sensor.station(),
                     due_in, sensor::UNIT_OF_MEASUREMENT);
        },
        None => {
            println!("{} ({}): unknown", sensor.name(), sensor.station());
        },
    }
    for (label, value) in sensor.attributes() {
        println!("  {}: {}", label, value);
    }
}

fn main() {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")
        .expect("bad log filter")
        .start()
        .expect("logger start");

    let args: Vec<String> = std::env::args().collect();
    let mut opts = getopts::Options::new();
    opts.optopt("s", "station", "Station to watch (exact Irish Rail name)", "STATION");
    opts.optopt("d", "direction", "Only show trains going this way, e.g. Northbound", "DIRECTION");
    opts.optopt("n", "name", "Display name for the sensor", "NAME");
    opts.optopt("i", "interval", "Seconds between polls", "SECONDS");
    opts.optflag("o", "one-shot", "Poll once and exit");
    opts.optflag("h", "help", "Print this help");

    let matches = opts.parse(&args[1..]).expect("parse opts");

    if matches.opt_present("help") {
        print_usage(&args[0], &opts);
        return;
    }

    let station = match matches.opt_str("station") {
        Some(station) => station,
        None => {
            print_usage(&args[0], &opts);
            std::process::exit(1);
        },
    };
    let direction = matches.opt_str("direction");
    let name = matches.opt_str("name");
    let one_shot = matches.opt_present("one-shot");
    let interval = matches.opt_str("interval")
        .map(|s| s.parse::<u64>().expect("interval must be a number of seconds"))
        .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);

    info!("Watching {} (direction={:?}) every {}s", station, direction, interval);

    let data = station::StationData::new(&station, direction.as_deref());
    let mut next_train = sensor::NextTrainSensor::new(data, name.as_deref());

    loop {
        next_train.update();
        print_sensor(&next_train);

        if one_shot {
            break;
        }
        std::thread::sleep(std::time::Duration::from_secs(interval));
    }
}
