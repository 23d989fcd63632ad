use arith_eval::open_input;
use arith_eval::parser::parse;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let input = open_input(std::env::args().nth(1).as_deref())?;
    let out = parse(input);
    println!("{:?}", out);
    Ok(())
}
