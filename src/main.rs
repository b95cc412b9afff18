use clap::Parser;
use dailyquote::palette::Palette;
use dailyquote::ui::App;
use dailyquote::Options;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};

fn main() -> anyhow::Result<()> {
    let options = Options::parse();
    setup_logger(&options)?;

    if options.print {
        return dailyquote::print_once(&options, std::io::stdout().lock());
    }

    let time_of_day = options.time_of_day();
    let palette = Palette::for_time_of_day(time_of_day);
    log::info!("{time_of_day:?} palette");
    for (name, hex) in palette.hex_entries() {
        log::debug!("{name}: {hex}");
    }

    let app = App::new(palette, options.selection())?;
    app.run()?;
    Ok(())
}

fn setup_logger(options: &Options) -> anyhow::Result<()> {
    if let Some(path) = &options.logfile {
        let file = dailyquote::create_logfile(path)?;
        WriteLogger::init(LevelFilter::Debug, Config::default(), file)?;
    } else if options.print {
        TermLogger::init(
            LevelFilter::Warn,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )?;
    }
    Ok(())
}
