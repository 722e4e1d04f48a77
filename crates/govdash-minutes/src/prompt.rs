//! Prompt template for minutes drafting

use crate::request::MinutesRequest;
use std::fmt::Write;

const INSTRUCTIONS: &str = "\
Você é secretário(a) de governança corporativa. A partir da transcrição abaixo, \
redija a ata da reunião.

Responda SOMENTE com um objeto JSON, sem texto adicional, no formato:
{
  \"executiveSummary\": \"resumo executivo em até 5 frases\",
  \"structuredMinutes\": \"ata estruturada por item de pauta, com deliberações\",
  \"actionPlan\": [
    { \"task\": \"ação\", \"owner\": \"responsável\", \"deadline\": \"prazo\" }
  ]
}";

/// Render the prompt for a request
///
/// Metadata first, then the numbered agenda, then the transcript verbatim.
#[must_use]
pub fn render_prompt(request: &MinutesRequest) -> String {
    let meeting = &request.meeting;
    let mut prompt = String::with_capacity(INSTRUCTIONS.len() + request.transcript.len() + 512);
    prompt.push_str(INSTRUCTIONS);
    prompt.push_str("\n\n## Reunião\n");

    // writing to a String cannot fail
    let _ = writeln!(prompt, "Título: {}", meeting.title);
    let _ = writeln!(prompt, "Data: {}", meeting.date);
    if let Some(committee) = &meeting.committee {
        let _ = writeln!(prompt, "Comitê: {committee}");
    }
    if !meeting.participants.is_empty() {
        let _ = writeln!(prompt, "Participantes: {}", meeting.participants.join(", "));
    }

    prompt.push_str("\n## Pauta\n");
    if request.agenda.is_empty() {
        prompt.push_str("(sem pauta informada)\n");
    }
    for (index, item) in request.agenda.iter().enumerate() {
        let _ = write!(prompt, "{}. {}", index + 1, item.title);
        if let Some(presenter) = &item.presenter {
            let _ = write!(prompt, " ({presenter})");
        }
        prompt.push('\n');
    }

    prompt.push_str("\n## Transcrição\n");
    prompt.push_str(request.transcript.trim());
    prompt.push('\n');
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{AgendaItem, MeetingInfo};

    fn request() -> MinutesRequest {
        MinutesRequest::new(
            "  Presidente abriu a sessão às 14h.  ",
            MeetingInfo::new("Reunião Ordinária", "12/03/2024")
                .with_committee("Comitê de Investimentos")
                .with_participants(["Ana", "Bruno"]),
        )
        .with_agenda(vec![
            AgendaItem::new("Aprovação do orçamento").with_presenter("CFO"),
            AgendaItem::new("Riscos do parque eólico"),
        ])
    }

    #[test]
    fn embeds_metadata_agenda_and_transcript() {
        let prompt = render_prompt(&request());
        assert!(prompt.contains("Título: Reunião Ordinária\n"));
        assert!(prompt.contains("Comitê: Comitê de Investimentos\n"));
        assert!(prompt.contains("Participantes: Ana, Bruno\n"));
        assert!(prompt.contains("1. Aprovação do orçamento (CFO)\n2. Riscos do parque eólico\n"));
        assert!(prompt.ends_with("## Transcrição\nPresidente abriu a sessão às 14h.\n"));
    }

    #[test]
    fn instructs_json_only_output() {
        let prompt = render_prompt(&request());
        assert!(prompt.starts_with(INSTRUCTIONS));
        for key in ["executiveSummary", "structuredMinutes", "actionPlan", "deadline"] {
            assert!(prompt.contains(key), "{key}");
        }
    }

    #[test]
    fn optional_sections_are_omitted() {
        let bare = MinutesRequest::new("texto", MeetingInfo::new("R", "hoje"));
        let prompt = render_prompt(&bare);
        assert!(!prompt.contains("Comitê:"));
        assert!(!prompt.contains("Participantes:"));
        assert!(prompt.contains("(sem pauta informada)"));
    }
}
