use gauge_slider::raster::parse_font;
use gauge_slider::{
    CountingMethod, DelegationMode, GaugeCommand, GaugeConfig, GaugeError, GaugeSlider, Rect,
};
use rand::Rng;
use std::env;
use std::process;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

const WINDOW_SIZE: f64 = 320.0;

struct Options {
    min_value: f64,
    max_value: f64,
    title: String,
    font_path: Option<String>,
    delegation_mode: DelegationMode,
    counting_method: CountingMethod,
    random: bool,
}

fn parse_counting(name: &str) -> Option<CountingMethod> {
    match name {
        "linear" => Some(CountingMethod::Linear),
        "ease-in" => Some(CountingMethod::EaseIn),
        "ease-out" => Some(CountingMethod::EaseOut),
        "ease-in-out" => Some(CountingMethod::EaseInOut),
        _ => None,
    }
}

fn parse_args() -> Options {
    let defaults = GaugeConfig::default();
    let mut options = Options {
        min_value: defaults.min_value,
        max_value: defaults.max_value,
        title: "Gauge Slider".to_string(),
        font_path: None,
        delegation_mode: defaults.delegation_mode,
        counting_method: defaults.counting_method,
        random: false,
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--range" => {
                if let (Some(x), Some(y)) = (args.next(), args.next()) {
                    if let (Ok(x), Ok(y)) = (x.parse::<f64>(), y.parse::<f64>()) {
                        options.min_value = x.min(y);
                        options.max_value = x.max(y);
                    }
                }
            }
            "--title" => {
                if let Some(title) = args.next() {
                    options.title = title;
                }
            }
            "--font" => options.font_path = args.next(),
            "--immediate" => {
                if let Some(Ok(interval)) = args.next().map(|v| v.parse::<f64>()) {
                    options.delegation_mode = DelegationMode::Immediate { interval };
                }
            }
            "--counting" => match args.next().as_deref().and_then(parse_counting) {
                Some(method) => options.counting_method = method,
                None => log::warn!("expected linear, ease-in, ease-out or ease-in-out"),
            },
            "--random" => options.random = true,
            other => log::warn!("ignoring unknown argument {other:?}"),
        }
    }
    options
}

/// Reads a font file for the lifetime of the process.
fn read_font(path: &str) -> Result<&'static [u8], GaugeError> {
    let data: &'static [u8] = Box::leak(std::fs::read(path)?.into_boxed_slice());
    parse_font(data)?;
    Ok(data)
}

fn run() -> Result<(), GaugeError> {
    let options = parse_args();
    let font_data = options.font_path.as_deref().map(read_font).transpose()?;

    let config = GaugeConfig::builder()
        .min_value(options.min_value)
        .max_value(options.max_value)
        .maybe_font_data(font_data)
        .counting_method(options.counting_method)
        .delegation_mode(options.delegation_mode)
        .build();

    let mut gauge = GaugeSlider::new(Rect::new(0.0, 0.0, WINDOW_SIZE, WINDOW_SIZE), config);
    gauge.on_progress_changed(|progress| log::info!("progress changed: {progress}"));
    gauge.on_button_action(|| log::info!("custom control pressed"));

    if !options.random {
        return gauge.show(&options.title);
    }

    let (sender, receiver) = mpsc::channel();
    let (min, max) = (options.min_value, options.max_value);
    thread::spawn(move || {
        let mut rng = rand::rng();
        loop {
            let command = GaugeCommand::SetValue {
                value: if max > min { rng.random_range(min..=max) } else { min },
                animated: true,
            };
            if sender.send(command).is_err() {
                break;
            }
            thread::sleep(Duration::from_millis(1500));
        }
    });
    gauge.show_with_commands(&options.title, receiver)
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        log::error!("{err}");
        eprintln!("gauge-slider: {err}");
        process::exit(1);
    }
}
