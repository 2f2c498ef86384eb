use std::{env, error::Error, fs, path::Path};
use math::RunningMean;
use reps::*;

static RESULTS_DIR: &str = "analysis";

/// Collects accepted reps and logs the other detector events.
/// 
#[derive(Default)]
struct Session
{
    reps: Vec<RepRecord>,
}

impl RepObserver for Session
{
    fn on_unrack(&mut self) {
        log::debug!("unrack");
    }

    fn on_phase_change(&mut self, phase: MotionPhase) {
        log::debug!("phase: {:?}", phase);
    }

    fn on_rep(&mut self, rep: &RepRecord) {
        if let Some(rom) = &rep.rom {
            if !rom.is_valid {
                log::warn!("Rep {}: {}", self.reps.len() + 1, rom);
            }
        }
        self.reps.push(*rep);
    }
}

/// Replays a recorded session (`time,accel_z,calibrated` rows) through the rep detector.
/// 
/// Usage: `test-reps <session.csv> [sample-rate-hz] [rom-min-m rom-max-m]`
/// 
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err("Expected CSV file to read samples from".into());
    }

    let mut config = DetectorConfig::default();
    if let Some(rate) = args.get(2) {
        config.sample_rate_hz = rate.parse()?;
    }
    if let (Some(min), Some(max)) = (args.get(3), args.get(4)) {
        config.rom = Some(RomConfig::Bounds {
            min: min.parse()?,
            max: max.parse()?,
            unit: DisplacementUnit::Meters,
        });
    }

    let mut detector = RepDetector::with_observer(config, Session::default())?;

    // Every input CSV file gets its own folder in the results directory.
    let in_path = Path::new(&args[1]);
    let name = in_path.file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or("Input path has no file name")?;
    let out_dir = format!("{}/{}", RESULTS_DIR, name);
    fs::create_dir_all(&out_dir)?;

    let mut rejected = 0;
    let mut reader = csv::Reader::from_path(in_path)?;
    for result in reader.deserialize::<(f64, f64, u8)>() {
        let (time, accel_z, calibrated) = result?;
        let report = detector.process(accel_z, time, calibrated != 0);
        if report.verdict == SampleVerdict::Rejected {
            rejected += 1;
        }
    }

    let session = detector.into_observer();

    let mut writer = csv::Writer::from_path(format!("{}/{}", out_dir, "reps.csv"))?;
    writer.write_record([
        "rep", "start", "peak_time", "end", "peak_velocity", "mean_velocity", "displacement", "valid",
    ])?;

    let mut mean_velocity = RunningMean::new();
    for (index, rep) in session.reps.iter().enumerate() {
        if rep.is_valid() {
            mean_velocity.push(rep.mean_velocity);
        }
        writer.write_record([
            (index + 1).to_string(),
            format!("{:.3}", rep.start_time),
            format!("{:.3}", rep.peak_time),
            format!("{:.3}", rep.end_time),
            format!("{:.3}", rep.peak_velocity),
            format!("{:.3}", rep.mean_velocity),
            format!("{:.3}", rep.displacement),
            rep.is_valid().to_string(),
        ])?;
    }
    writer.flush()?;

    log::info!(
        "{}: {} reps ({} valid, mean velocity {:.3} m/s), {} samples rejected",
        name, session.reps.len(), mean_velocity.count(), mean_velocity.mean(), rejected
    );
    Ok(())
}
