//! Print the GraphQL schema definition language document.

use std::io::Write;

fn main() -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", bookshelf::inbound::graphql::sdl())
}
