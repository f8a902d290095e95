use clap::Parser;

/// Quaver - browse a Subsonic library and play it through MPD 🎵
#[derive(Parser, Debug, Default)]
#[command(name = "quaver", version, about)]
pub struct Args {
    /// Subsonic server URL (overrides config.toml)
    #[arg(long)]
    pub server: Option<String>,

    /// Subsonic username
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Subsonic password
    #[arg(long, short = 'p')]
    pub password: Option<String>,

    /// MPD host
    #[arg(long)]
    pub mpd_host: Option<String>,

    /// MPD port
    #[arg(long)]
    pub mpd_port: Option<u16>,

    /// Print the default config.toml to stdout and exit
    #[arg(long)]
    pub generate_config: bool,
}

impl Args {
    /// Command-line values win over the config file.
    pub fn apply(&self, config: &mut crate::app::config::UserConfig) {
        if let Some(url) = &self.server {
            config.server.url = url.clone();
        }
        if let Some(username) = &self.username {
            config.server.username = username.clone();
        }
        if let Some(password) = &self.password {
            config.server.password = password.clone();
        }
        if let Some(host) = &self.mpd_host {
            config.player.mpd_host = host.clone();
        }
        if let Some(port) = self.mpd_port {
            config.player.mpd_port = port;
        }
    }
}
