use minishell::Interpreter;

fn main() {
    println!("minishell — type 'help' to list the built-in commands");
    if let Err(err) = Interpreter::default().repl() {
        eprintln!("minishell: {err:#}");
        std::process::exit(1);
    }
}
