use boltview::api::{CmdMessage, MessageLevel};
use boltview::error::Result;
use boltview::model::Bucket;
use colored::Colorize;
use std::collections::BTreeMap;

pub(crate) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Buffer lines go out verbatim so the output can be edited and applied back.
pub(crate) fn print_lines<L: AsRef<str>>(lines: &[L]) {
    for line in lines {
        println!("{}", line.as_ref());
    }
}

pub(crate) fn print_buckets_json(buckets: &[Bucket]) -> Result<()> {
    let view: BTreeMap<&str, BTreeMap<String, String>> = buckets
        .iter()
        .map(|b| {
            let entries: BTreeMap<String, String> = b
                .entries
                .iter()
                .map(|e| (e.key_str().into_owned(), e.value_str().into_owned()))
                .collect();
            (b.name.as_str(), entries)
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
