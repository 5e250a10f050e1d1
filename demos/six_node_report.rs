//! Prints the reference six-node analysis: hot case, cold case and the
//! maneuver recovery curves.
//!
//! The stand-alone recovery study (0.6 m² radiator, 14 kg of aluminum,
//! 262.4 W during and 214.2 W after the maneuver) is swept from 1 to 45 min.

use twine_satellite_thermal::models::thermal::six_node::{
    CaseBalance, DurationLimit, ManeuverRecovery, ManeuverStudy, MaxDurationConfig, SixNodeAnalysis,
};
use uom::si::{
    area::square_meter,
    f64::{ThermodynamicTemperature, Time},
    power::watt,
    ratio::percent,
    thermodynamic_temperature::{degree_celsius, kelvin},
    time::minute,
};

fn print_faces(title: &str, balance: &CaseBalance) {
    println!("{title}");
    for report in &balance.faces {
        println!(
            "  {:<16} T_skin = {:7.2} K   leak = {:8.3} W",
            report.face.label(),
            report.balance.skin_temperature.get::<kelvin>(),
            report.balance.leak.get::<watt>(),
        );
    }
    println!("  total leak = {:.3} W", balance.total_leak.get::<watt>());
}

fn print_run(run: &ManeuverRecovery) {
    println!(
        "  {:4.0} min -> peak {:.2} K, recovery {:6.1} min",
        run.duration.get::<minute>(),
        run.peak_temperature.get::<kelvin>(),
        run.recovery_time.get::<minute>(),
    );
}

fn minutes(value: u32) -> Time {
    Time::new::<minute>(f64::from(value))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let analysis = SixNodeAnalysis::default();
    let report = analysis.run()?;

    print_faces("Hot case", &report.hot);
    println!(
        "  radiator = {:.4} m² ({:.1} % of the face)",
        report.sizing.area.get::<square_meter>(),
        report.sizing.coverage().get::<percent>(),
    );

    print_faces("Cold case", &report.cold);
    println!(
        "  losses = {:.2} W, heaters = {:.2} W",
        report.heaters.total_loss.get::<watt>(),
        report.heaters.heater_power.get::<watt>(),
    );

    println!(
        "Maneuver: {:.2} W nominal, {:.2} W radiator sunward, peak {:.2} °C after {:.0} min",
        report.loads.nominal.get::<watt>(),
        report.loads.maneuver.get::<watt>(),
        report.maneuver.peak.temperature.get::<degree_celsius>(),
        analysis.config().maneuver_duration.get::<minute>(),
    );

    let study = analysis.maneuver_study(&report)?;
    for run in study.sweep((1..=6).map(|step| minutes(step * 5)))? {
        print_run(&run);
    }

    let reference = ManeuverStudy::reference()?;
    println!("Reference recovery study");
    for run in reference.sweep([10, 20, 30].map(minutes))? {
        print_run(&run);
    }

    println!("Reference recovery curve");
    for run in reference.sweep((1..=45).map(minutes))? {
        print_run(&run);
    }

    let limit = ThermodynamicTemperature::new::<degree_celsius>(30.0);
    let search_cap = minutes(600);
    let config = MaxDurationConfig::default();
    match study.max_duration(limit, search_cap, &config) {
        Ok(DurationLimit::Limited(duration)) => {
            println!(
                "Longest maneuver under 30 °C: {:.1} min",
                duration.get::<minute>()
            );
        }
        Ok(DurationLimit::Unbounded) => println!("No maneuver reaches 30 °C"),
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
