//! `slpa slots`: the slot schema.

use anyhow::{bail, Result};
use slpa_core::schema::{self, Slot, SLOT_COUNT};

fn describe(slot: &'static Slot) -> String {
    let symbols = match slot.constant() {
        Some(symbol) => format!("constant {symbol}"),
        None => slot.alphabet().join(" "),
    };
    format!(
        "{:>2}  {:<22} {:<40} {}",
        slot.number,
        slot.field.name(),
        slot.purpose,
        symbols
    )
}

/// The listing for one slot, or for all of them.
pub(crate) fn render(only: Option<usize>) -> Result<String> {
    let mut out = String::new();
    match only {
        Some(n) if !(1..=SLOT_COUNT).contains(&n) => {
            bail!("slot must be between 1 and {SLOT_COUNT}, got {n}")
        }
        Some(n) => {
            out.push_str(&describe(schema::slot(n)));
            out.push('\n');
        }
        None => {
            for slot in schema::slots() {
                out.push_str(&describe(slot));
                out.push('\n');
            }
        }
    }
    Ok(out)
}

pub fn run(only: Option<usize>) -> Result<()> {
    print!("{}", render(only)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_slot() {
        let text = render(None).unwrap();
        assert_eq!(text.lines().count(), SLOT_COUNT);
    }

    #[test]
    fn single_slot() {
        let text = render(Some(8)).unwrap();
        assert!(text.contains("constant \u{2205}"));
        let text = render(Some(20)).unwrap();
        assert!(text.contains("x+"));
        assert!(render(Some(35)).is_err());
        assert!(render(Some(0)).is_err());
    }
}
