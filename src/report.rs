use promolex::{BatchResult, QaStats};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_summary(result: &BatchResult, color: bool) {
    let palette = ansi::Palette::new(color);

    let headline = if result.failures.is_empty() {
        format!("⚙  Processed {} items", result.stats.total_items)
    } else {
        format!("⚙  Processed {} items ({} failed)", result.stats.total_items, result.failures.len())
    };
    println!("\n{}", palette.bold(palette.paint(headline, ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ QA Summary ━━━", ansi::GRAY));
    print_counters(&result.stats, &palette);

    if !result.failures.is_empty() {
        println!("\n{}", palette.paint("━━━ Failures ━━━", ansi::GRAY));
        for failure in &result.failures {
            println!(
                "  {} {}",
                palette.paint(format!("[{}]", failure.index), ansi::GRAY),
                palette.paint(&failure.error, ansi::YELLOW)
            );
        }
    }
    println!();
}

fn print_counters(stats: &QaStats, palette: &ansi::Palette) {
    println!("  Items:   {}", palette.bold(stats.total_items.to_string()));
    println!(
        "  Deals:   {}  {}",
        palette.paint(format!("{} described", stats.deal_descriptions), ansi::GREEN),
        unpriced(stats.deals_unpriced, palette),
    );
    println!(
        "  Coupons: {}  {}",
        palette.paint(format!("{} described", stats.coupon_descriptions), ansi::GREEN),
        unpriced(stats.coupons_unpriced, palette),
    );
}

fn unpriced(count: usize, palette: &ansi::Palette) -> String {
    if count > 0 {
        palette.paint(format!("✗ {count} unpriced"), ansi::YELLOW)
    } else {
        palette.dim("✓ all priced")
    }
}
