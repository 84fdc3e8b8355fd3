use virumap::app::command_handlers;

fn output_header() -> &'static str {
    "Virufy data collection\nRecords cough, breath and speech samples for COVID-19 research."
}

fn print_header() {
    println!("{}\n", output_header());
}

fn run() -> Result<(), String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.first().map(String::as_str) != Some("store") {
        print_header();
    }
    let output = command_handlers::run_cli(args)?;
    println!("{output}");
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
