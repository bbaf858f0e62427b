use std::path::Path;

use console::Style;
use intensify_core::consts::{BACKGROUND_DIR_NAME, SMOOTHED_DIR_NAME};
use intensify_core::pipeline::config::FlattenConfig;
use intensify_core::pipeline::BatchReport;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
    warning: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
            warning: Style::new().yellow().bold(),
        }
    }
}

pub fn print_batch_summary(config: &FlattenConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Intensify Batch"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(15)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.display())
    );
    let threads = if config.threads == 0 {
        "auto".to_string()
    } else {
        config.threads.to_string()
    };
    println!(
        "  {:<14}{}",
        s.label.apply_to("Threads"),
        s.value.apply_to(threads)
    );
    println!();

    println!("  {}", s.header.apply_to("Background"));
    if config.reuse_backgrounds {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Source"),
            s.disabled.apply_to(format!("reusing {BACKGROUND_DIR_NAME}/"))
        );
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Ceiling"),
            s.value.apply_to(config.background.max_tissue_intensity)
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Samples"),
            s.value.apply_to(config.background.sample_size)
        );
    }
    println!();

    println!("  {}", s.header.apply_to("Smoothing"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Kernel"),
        s.method.apply_to(config.smoothing.kernel)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Window"),
        s.value.apply_to(format!(
            "{0}x{0}",
            config.smoothing.window_size
        ))
    );
    if !config.save_intermediates {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Keep"),
            s.disabled.apply_to("not saved")
        );
    }
    println!();

    println!("  {}", s.header.apply_to("Normalization"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Policy"),
        s.method.apply_to(config.normalization.policy)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Depth"),
        s.value.apply_to(config.normalization.output_depth)
    );
    println!();
}

pub fn print_batch_report(report: &BatchReport, output: &Path) {
    let s = Styles::new();

    println!();
    println!(
        "  {:<14}{} of {}",
        s.label.apply_to("Corrected"),
        s.value.apply_to(report.processed),
        report.discovered
    );
    if report.cancelled {
        println!("  {}", s.warning.apply_to("Batch cancelled before completion"));
    }
    if !report.skipped.is_empty() {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Skipped"),
            s.warning.apply_to(report.skipped.len())
        );
        for skipped in &report.skipped {
            println!(
                "    {} {} {}",
                s.path.apply_to(skipped.path.display()),
                s.label.apply_to(format!("[{}]", skipped.stage)),
                skipped.reason
            );
        }
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Backgrounds"),
        s.path.apply_to(output.join(BACKGROUND_DIR_NAME).display())
    );
    let smoothed = output.join(SMOOTHED_DIR_NAME);
    if smoothed.is_dir() {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Smoothed"),
            s.path.apply_to(smoothed.display())
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output.display())
    );
    println!();
}
