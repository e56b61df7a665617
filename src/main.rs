use mavsettings::shell::{Shell, ShellAction};
use mavsettings::{demo_settings, init_logging, SettingsPersistence};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;
    info!("mavsettings {} (built {})", mavsettings::VERSION, mavsettings::BUILD_DATE);

    let mut settings = demo_settings();
    settings.set_callback(|setting| info!("Changing {} to {}", setting.name, setting.value_text()));

    let settings_path = match SettingsPersistence::ensure_config_dir() {
        Ok(dir) => dir.join("settings.toml"),
        Err(e) => {
            warn!("{}; using the working directory", e);
            "settings.toml".into()
        }
    };
    if settings_path.exists() {
        if let Err(e) = SettingsPersistence::load_into(&mut settings, &settings_path) {
            warn!("Could not load {}: {}", settings_path.display(), e);
        }
    }

    let mut shell = Shell::new(settings, settings_path);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "settings> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match shell.execute(&line) {
            ShellAction::Continue(lines) => {
                for l in lines {
                    writeln!(stdout, "{}", l)?;
                }
            }
            ShellAction::Quit => break,
        }
    }

    shell.execute("close");
    Ok(())
}
