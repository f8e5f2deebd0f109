use gauge_slider::{
    Color, CountingMethod, DelegationMode, GaugeCommand, GaugeConfig, GaugeSlider, Rect,
};
use rand::Rng;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Configure the gauge using the bon-generated builder
    let config = GaugeConfig::builder()
        .min_value(0.0)
        .max_value(100.0)
        .unit("%".to_string())
        .placeholder("Load".to_string())
        .fill_path_color(Color::new(0x2e, 0x86, 0xde))
        .custom_control_button_visible(false)
        .delegation_mode(DelegationMode::Immediate { interval: 5.0 })
        .build();

    let mut gauge = GaugeSlider::new(Rect::new(0.0, 0.0, 360.0, 360.0), config);
    gauge.on_progress_changed(|progress| println!("progress: {progress}"));

    // Create a channel for sending random commands
    let (sender, receiver) = mpsc::channel();

    // Spawn a thread to generate random commands continuously
    thread::spawn(move || {
        let mut rng = rand::rng();
        let methods = [
            CountingMethod::Linear,
            CountingMethod::EaseIn,
            CountingMethod::EaseOut,
            CountingMethod::EaseInOut,
        ];
        loop {
            let commands = [
                GaugeCommand::SetCountingMethod(methods[rng.random_range(0..methods.len())]),
                GaugeCommand::SetValue {
                    value: rng.random_range(0.0..=100.0),
                    animated: true,
                },
            ];

            // Send all commands, break if any fail
            if commands.into_iter().any(|cmd| sender.send(cmd).is_err()) {
                break;
            }

            thread::sleep(Duration::from_millis(1200));
        }
    });

    println!("Displaying a gauge that moves to random values:");
    println!("- Drag or tap the track to take over");
    println!("- Progress notifications are printed every 5%");
    println!("Press Ctrl+C to exit");

    gauge.show_with_commands("Random gauge", receiver)?;
    Ok(())
}
