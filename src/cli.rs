use std::io::{self, Write};

use crate::api::{MapAPI, RouteAPI};
use crate::engine::Engine;
use crate::error::{invalid_input_error, Error};

pub async fn run(engine: &Engine) -> Result<(), Error> {
    println!("=========================================");
    println!("        DELHI LANDMARK ROUTING           ");
    println!("=========================================");

    let summary = engine.describe_map().await?;
    let names: Vec<String> = summary
        .locations
        .iter()
        .map(|location| location.name.clone())
        .collect();

    println!("\nAvailable locations:");
    for (index, name) in names.iter().enumerate() {
        println!(" {}. {}", index + 1, name);
    }

    println!("\n--- Route Selection ---");
    let origin = prompt_selection("Select start location", &names)?;
    let destination = prompt_selection("Select destination", &names)?;
    let speed_kmh = prompt_speed()?;

    println!("\nCalculating best route from '{}' to '{}'...", origin, destination);

    match engine
        .plan_route(origin.clone(), destination.clone(), speed_kmh)
        .await?
    {
        Some(route) => {
            println!("\n=========================================");
            println!("              RIDE DETAILS               ");
            println!("=========================================");
            println!("Route: {}", route.path.join(" -> "));
            println!("Total distance: {:.2} km", route.kilometers());
            println!("Estimated time: {}", route.eta);
            println!("=========================================");
        }
        None => println!("\nNo path found between {} and {}.", origin, destination),
    }

    Ok(())
}

fn prompt_selection(label: &str, names: &[String]) -> Result<String, Error> {
    loop {
        print!("{} (1-{}): ", label, names.len());
        io::stdout().flush()?;

        let line = read_line()?;

        match line.trim().parse::<usize>() {
            Ok(choice) if (1..=names.len()).contains(&choice) => {
                return Ok(names[choice - 1].clone())
            }
            _ => println!("Please pick a number between 1 and {}.", names.len()),
        }
    }
}

fn prompt_speed() -> Result<f64, Error> {
    loop {
        print!("Enter average speed (km/h): ");
        io::stdout().flush()?;

        let line = read_line()?;

        match line.trim().parse::<f64>() {
            Ok(speed) if speed > 0.0 && speed.is_finite() => return Ok(speed),
            _ => println!("Speed must be a number greater than 0."),
        }
    }
}

fn read_line() -> Result<String, Error> {
    let mut line = String::new();
    let bytes = io::stdin().read_line(&mut line)?;

    // stdin closed mid-prompt
    if bytes == 0 {
        return Err(invalid_input_error());
    }

    Ok(line)
}
