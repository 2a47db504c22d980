use market_dashboard::Dashboard;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("market_dashboard=debug".parse()?),
        )
        .with_target(true)
        .init();

    let dashboard = Dashboard::new()?;
    println!(
        "Rendering dashboard (gateway: {})...",
        dashboard.gateway_name()
    );
    println!("-------------------------------------------");

    let start = Instant::now();
    let results = dashboard.render_dashboard().await;

    for (widget, result) in results {
        println!("[{}] {}", widget.route(), widget);
        match result {
            Ok(fragment) => println!("{}", fragment),
            // The HTTP layer answers these with a 500 and the generic text
            Err(e) => {
                eprintln!("   Error: {}", e);
                println!("{}", e.user_message());
            }
        }
        println!();
    }

    println!("-------------------------------------------");
    println!("Rendered all widgets in {:?}", start.elapsed());

    Ok(())
}
