use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use qpaper::{
    DocumentEmitter, DocxEmitter, DocxOptions, PageSize, PaperForm, PdfEmitter, PdfOptions,
    Validation,
};

#[derive(Parser)]
#[command(name = "qpaper", about = "Generate question papers as PDF and DOCX")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a blank paper form with the given number of sections
    Init {
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
        sections: u16,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check that a paper form is complete
    Check {
        /// Paper form JSON file, or - for stdin
        form: PathBuf,
    },
    /// Print the paper as plain text
    Preview {
        /// Paper form JSON file, or - for stdin
        form: PathBuf,
    },
    /// Generate question_paper.pdf and/or question_paper.docx
    Generate {
        /// Paper form JSON file, or - for stdin
        form: PathBuf,
        /// Directory to write the documents into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Both)]
        format: Format,
        #[arg(long, value_enum, default_value_t = PageSize::Letter)]
        page_size: PageSize,
        /// TrueType/OpenType font for question text in the PDF
        #[arg(long, env = "QPAPER_FONT")]
        font: Option<PathBuf>,
        /// TrueType/OpenType font for section headers in the PDF
        #[arg(long, env = "QPAPER_BOLD_FONT")]
        bold_font: Option<PathBuf>,
        /// Body font name written into the DOCX styles
        #[arg(long, default_value = "Calibri")]
        docx_font: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Pdf,
    Docx,
    Both,
}

fn load_form(path: &Path) -> Result<PaperForm, qpaper::Error> {
    if path == Path::new("-") {
        let mut json = String::new();
        std::io::stdin().read_to_string(&mut json)?;
        PaperForm::from_json(&json)
    } else {
        PaperForm::load(path)
    }
}

fn report(validation: &Validation) {
    for problem in validation.problems() {
        eprintln!("Warning: {}", problem.message());
    }
    if !validation.incomplete_sections.is_empty() {
        eprintln!(
            "Incomplete section(s): {}",
            validation.incomplete_sections.join(", ")
        );
    }
}

fn run(command: Command) -> Result<bool, qpaper::Error> {
    match command {
        Command::Init { sections, output } => {
            let json = PaperForm::blank(usize::from(sections)).to_json()?;
            match output {
                Some(path) => std::fs::write(path, json + "\n")?,
                None => println!("{json}"),
            }
            Ok(true)
        }
        Command::Check { form } => {
            let validation = qpaper::validate(&load_form(&form)?.to_paper());
            if validation.is_valid() {
                println!("Paper is ready to generate.");
            } else {
                report(&validation);
            }
            Ok(validation.is_valid())
        }
        Command::Preview { form } => {
            let paper = load_form(&form)?.to_paper();
            let validation = qpaper::validate(&paper);
            if !validation.is_valid() {
                report(&validation);
                return Ok(false);
            }
            for block in qpaper::render_blocks(&paper) {
                println!("{}", block.text);
            }
            Ok(true)
        }
        Command::Generate {
            form,
            out_dir,
            format,
            page_size,
            font,
            bold_font,
            docx_font,
        } => {
            let paper = load_form(&form)?.to_paper();
            let validation = qpaper::validate(&paper);
            if !validation.is_valid() {
                report(&validation);
                return Ok(false);
            }

            let mut emitters: Vec<Box<dyn DocumentEmitter>> = Vec::new();
            if matches!(format, Format::Pdf | Format::Both) {
                emitters.push(Box::new(PdfEmitter::new(PdfOptions {
                    page_size,
                    font,
                    bold_font,
                    ..PdfOptions::default()
                })?));
            }
            if matches!(format, Format::Docx | Format::Both) {
                emitters.push(Box::new(DocxEmitter::new(DocxOptions {
                    font_name: docx_font,
                    ..DocxOptions::default()
                })));
            }

            std::fs::create_dir_all(&out_dir)?;
            let emitters: Vec<&dyn DocumentEmitter> = emitters.iter().map(|e| &**e).collect();
            for artifact in qpaper::generate(&paper, &emitters)? {
                let path = artifact.write_to(&out_dir)?;
                println!("{} ({})", path.display(), artifact.mime_type);
            }
            Ok(true)
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    match run(args.command) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
