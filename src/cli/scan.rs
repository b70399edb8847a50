use std::path::PathBuf;

use tabled::Table;

use crate::{
    error, info,
    scanner::{Scanner, Service},
    transcript::TranscriptSource,
    types::LinkTableRow,
    warning,
};

pub async fn scan(transcript: Option<PathBuf>, service: Service, prefix: Option<String>) {
    let mut source = super::terminal_transcript(transcript);
    let text = match source.read_transcript().await {
        Ok(text) => text,
        Err(e) => error!("{}", e),
    };

    let scanner = Scanner::new(service.strategy(prefix));
    let links = scanner.scan(&text);

    if links.is_empty() {
        warning!("No matching links found");
        return;
    }

    let rows: Vec<LinkTableRow> = links
        .into_iter()
        .enumerate()
        .map(|(i, link)| LinkTableRow {
            position: i + 1,
            link,
        })
        .collect();
    let count = rows.len();

    println!("{}", Table::new(rows));
    info!("{} matching links found", count);
}
