use clap::{CommandFactory, Parser, Subcommand};
use diff_split::SplitDiff;
use diff_split::report;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "diff-split")]
#[command(about = "Split unified diff text into sections and query them by position")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every section of a patch with its span
    Outline {
        /// Patch file to read, or "-" for stdin
        patch: PathBuf,
    },
    /// Describe the commit, file and hunk at a byte offset
    Locate {
        /// Patch file to read, or "-" for stdin
        patch: PathBuf,
        /// Byte offset into the patch text
        #[arg(long)]
        offset: usize,
    },
    /// List the files of a patch with their hunk counts
    Files {
        /// Patch file to read, or "-" for stdin
        patch: PathBuf,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Render the manual page
    #[command(hide = true)]
    Man,
}

fn read_patch(patch: &Path) -> std::io::Result<String> {
    if patch == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(patch)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Outline { patch } => {
            let text = read_patch(&patch)?;
            println!("{}", report::outline(&SplitDiff::parse(&text)));
        }
        Commands::Locate { patch, offset } => {
            let text = read_patch(&patch)?;
            println!("{}", report::locate(&SplitDiff::parse(&text), offset)?);
        }
        Commands::Files { patch } => {
            let text = read_patch(&patch)?;
            println!("{}", report::files(&SplitDiff::parse(&text)));
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "diff-split", &mut std::io::stdout());
        }
        Commands::Man => {
            clap_mangen::Man::new(Cli::command()).render(&mut std::io::stdout())?;
        }
    }

    Ok(())
}
