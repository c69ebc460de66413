//! Command-line interface configuration.

use argh::FromArgs;

/// Serve a TinyGo package as WebAssembly, recompiling it on every reload.
#[derive(Debug, FromArgs)]
pub struct Cli {
    /// HTTP bind address to serve (default: ':8080')
    #[argh(option, default = "String::from(\":8080\")")]
    pub http: String,

    /// comma-separated build tags passed through to the compiler
    #[argh(option, default = "String::new()")]
    pub tags: String,

    /// allow the specified origin (or '*' for all origins) to make requests to this server
    #[argh(option, long = "allow-origin", default = "String::new()")]
    pub allow_origin: String,

    /// disable outputting debug symbols; this can cut the generated binary size by more than half
    #[argh(switch, long = "no-debug")]
    pub no_debug: bool,

    /// package path to build (default: current directory)
    #[argh(positional)]
    pub target: Option<String>,
}

impl Cli {
    /// Expands the `:8080` bind shorthand into an address `TcpListener` accepts.
    pub fn bind_addr(&self) -> String {
        if self.http.starts_with(':') {
            format!("0.0.0.0{}", self.http)
        } else {
            self.http.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_with_http(http: &str) -> Cli {
        Cli {
            http: http.to_string(),
            tags: String::new(),
            allow_origin: String::new(),
            no_debug: false,
            target: None,
        }
    }

    #[test]
    fn expands_bare_port_shorthand() {
        assert_eq!(cli_with_http(":8080").bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn keeps_full_addresses_untouched() {
        assert_eq!(cli_with_http("127.0.0.1:3000").bind_addr(), "127.0.0.1:3000");
    }
}
