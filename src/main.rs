//! ltw - plan ordered ltree labels from the command line

fn main() {
    if let Err(err) = ltreework::cli::run() {
        ltreework::ui::output::error(format!("{:#}", err));
        std::process::exit(1);
    }
}
