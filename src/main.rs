use std::{env, fs::read_to_string, path::PathBuf, process, time::Instant};

use minic::{
    display_error, lexer::lexer::tokenize, parser::parser::parse, semantic::analyzer::analyze,
    tac::generator::TacGenerator,
};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <source file>", args.first().map_or("minic", String::as_str));
        process::exit(2);
    }

    let file_path = PathBuf::from(&args[1]);
    let file_contents = match read_to_string(&file_path) {
        Ok(contents) => contents,
        Err(error) => {
            eprintln!("Failed to read {}: {}", file_path.display(), error);
            process::exit(1);
        }
    };

    let start = Instant::now();

    let tokenized = tokenize(&file_contents);

    println!("Tokenized in {:?}", start.elapsed());

    for error in &tokenized.errors {
        println!("{}", error);
    }

    let parse_start = Instant::now();
    let (parser, parsed_ast) = parse(tokenized.tokens.clone());

    println!("Parsed in {:?}", parse_start.elapsed());

    let ast = match parsed_ast {
        Ok(ast) => ast,
        Err(error) => {
            display_error(&error, &file_path);
            println!("{}", error);
            process::exit(1);
        }
    };
    let symbols = parser.into_symbols();

    let analyze_start = Instant::now();
    let (_, diagnostics) = analyze(&ast, &tokenized.tokens, Some(&symbols));

    println!("Analyzed in {:?}", analyze_start.elapsed());

    for diagnostic in &diagnostics {
        println!("{}", diagnostic);
    }

    if diagnostics.iter().any(|diagnostic| diagnostic.is_error()) {
        process::exit(1);
    }

    let tac_start = Instant::now();
    let mut generator = TacGenerator::new();
    generator.generate(&ast);

    println!("Generated TAC in {:?}", tac_start.elapsed());

    for line in generator.listing() {
        println!("{}", line);
    }
    println!(
        "Temporaries: {}, labels: {}",
        generator.temporaries_allocated(),
        generator.labels_allocated()
    );

    println!("Total time: {:?}", start.elapsed());
}
