#![forbid(unsafe_code)]

use std::{
    fs::File,
    io::{self, Read},
    path::PathBuf,
};

use clap::Parser as ArgParser;

use astwalk::{
    error::{ErrorHandler, FatalError},
    loader, traverser,
};

/// A traversal driver for ASTs serialized by a language front end
#[derive(ArgParser)]
#[clap(about)]
struct Args {
    /// Path to a file containing the serialized AST, or - to read from stdin
    path: PathBuf,

    /// Whether to name each visited node's parent next to it
    #[clap(short, long)]
    parents: bool,
}

fn main() {
    let args = Args::parse();

    let reader: Box<dyn Read> = if args.path == PathBuf::from("-") {
        Box::new(io::stdin())
    } else {
        let file = ErrorHandler::handle_result(
            File::open(args.path).map_err(|err| FatalError::IoError(err.to_string())),
        );
        Box::new(file)
    };

    let loaded = ErrorHandler::handle_result(loader::load(reader));
    let mut ast = loaded.ast;

    traverser::walk(&mut ast, loaded.root, |ast, id| {
        let indent = "  ".repeat(ast.ancestors(id).count());
        if args.parents {
            let parent = match ast.parent(id) {
                Some(parent) => ast.node(parent).kind.name(),
                None => "-",
            };
            println!("{}{} <- {}", indent, ast.node(id).kind.name(), parent);
        } else {
            println!("{}{}", indent, ast.node(id).kind.name());
        }
    });
}
