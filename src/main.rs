use americano::{Context, ParsedExpression, Value};
use log::{debug, error, info, trace};
use rustyline::{error::ReadlineError, DefaultEditor};
use thiserror::Error;

type DynResult = Result<(), Box<dyn std::error::Error>>;

const CONTEXT_ENV: &str = "AMERICANO_CONTEXT";

#[derive(Debug, Error)]
enum CliError {
    #[error("usage: americano (-e <expression> | -i) [-c <context.json>]")]
    Usage,

    #[error("flag `{0}` expects a value")]
    MissingValue(String),

    #[error("unknown argument `{0}`")]
    UnknownArgument(String),
}

enum Mode {
    Eval(String),
    Repl,
}

struct Args {
    mode: Mode,
    context_path: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, CliError> {
    let mut mode = None;
    let mut context_path = std::env::var(CONTEXT_ENV).ok();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-e" => {
                let expr = args.next().ok_or(CliError::MissingValue(arg))?;
                mode = Some(Mode::Eval(expr));
            }
            "-i" => mode = Some(Mode::Repl),
            "-c" => {
                context_path = Some(args.next().ok_or(CliError::MissingValue(arg))?);
            }
            _ => return Err(CliError::UnknownArgument(arg)),
        }
    }

    Ok(Args {
        mode: mode.ok_or(CliError::Usage)?,
        context_path,
    })
}

fn main() -> DynResult {
    if let Err(e) = dotenvy::dotenv() {
        println!("dotenvy load with error {}", e);
    }
    env_logger::init();

    let args = parse_args(std::env::args().skip(1))?;
    let context = load_context(args.context_path.as_deref())?;

    match args.mode {
        Mode::Eval(input) => run_expr(&input, &context),
        Mode::Repl => repl(&context),
    }
}

fn load_context(path: Option<&str>) -> Result<Context, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(Context::new());
    };
    info!("Read context from {}", path);
    let contents = std::fs::read_to_string(path)?;
    let context = Context::from_json_str(&contents)?;
    debug!("{:?}", context);
    Ok(context)
}

fn repl(context: &Context) -> DynResult {
    info!("Running in REPL mode");

    let mut rl = DefaultEditor::new()?;

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let input = line.trim_end();
                if input.is_empty() {
                    continue;
                }
                if input == "quit" {
                    break;
                }
                rl.add_history_entry(input)?;
                run_expr(input, context).unwrap_or_else(|e| error!("{}", e));
            }
            Err(ReadlineError::Eof) => break,
            Err(ReadlineError::Interrupted) => break,
            Err(err) => {
                return Err(Box::new(err));
            }
        }
    }

    Ok(())
}

fn parse(input: &str) -> Result<ParsedExpression, Box<dyn std::error::Error>> {
    match americano::parse(input) {
        Ok(expr) => {
            trace!("{:?}", expr.root());
            Ok(expr)
        }
        Err(err) => {
            error!("Parse error: {}", err);
            trace!("{:?}", err.get_source_start(input));
            Err(Box::new(err))
        }
    }
}

fn run_expr(input: &str, context: &Context) -> DynResult {
    let expr = parse(input)?;

    match expr.eval(context) {
        Ok(value) => {
            println!("{}", render(&value));
            Ok(())
        }
        Err(err) => {
            error!("Interpreter error: {}", err);
            Err(Box::new(err))
        }
    }
}

fn render(value: &Value) -> String {
    value.to_json().unwrap_or_else(|| value.to_string())
}
