use arith_eval::{open_input, run};
use std::io;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let input = open_input(std::env::args().nth(1).as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    run(input, &mut out)?;
    Ok(())
}
