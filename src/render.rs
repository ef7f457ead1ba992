//! Textový výpis výsledku bolão (tabulka jako na webu).

use crate::session::CheckSession;
use std::fmt::Write;

const DASH: &str = "-";

fn status_label(tier: bet_scorer::Tier) -> String {
    match tier {
        bet_scorer::Tier::TopPrize => format!("{} (ricos!)", tier.label()),
        _ => tier.label().to_string(),
    }
}

pub fn render_report(session: &CheckSession) -> String {
    let mut out = String::new();
    let summary = session.summary();

    let _ = writeln!(out, "Apostas válidas detectadas: {}", summary.valid_bets);

    if let Some(err) = session.error() {
        let _ = writeln!(out, "Erro: {err}");
    }

    let Some(draw) = session.last_draw() else {
        return out;
    };

    let contest = draw.contest_number.map_or_else(|| DASH.to_string(), |c| c.to_string());
    let _ = writeln!(
        out,
        "Sorteio: {} ({}) - Dezenas: {}  [fonte: {}]",
        contest,
        draw.draw_date.as_deref().unwrap_or(DASH),
        draw.drawn_numbers.join(" "),
        draw.source_name,
    );
    let _ = writeln!(
        out,
        "Sena: {}  Quina: {}  Quadra: {}",
        summary.top_prize, summary.second_tier, summary.third_tier
    );
    let _ = writeln!(out);

    let outcomes = session.outcomes();
    let width = outcomes.iter().map(|o| o.numbers.joined().len()).max().unwrap_or(0).max(7);

    let _ = writeln!(out, "{:>3}  {:<width$}  {:>7}  {:<17}  Status", "#", "Números", "Acertos", "Acertou");
    for o in &outcomes {
        let hits = if o.hit_numbers.is_empty() { DASH.to_string() } else { o.hit_numbers.join(" ") };
        let _ = writeln!(
            out,
            "{:>3}  {:<width$}  {:>7}  {:<17}  {}",
            o.bet_index,
            o.numbers.joined(),
            o.hit_count,
            hits,
            status_label(o.tier),
        );
    }

    if outcomes.iter().any(|o| o.numbers.len() > session.game().drawn_count) {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Nota: para apostas com mais de {} números, SENA significa que as {} dezenas sorteadas \
             estão dentro da sua linha (pelo menos 1 combinação vencedora).",
            session.game().drawn_count,
            session.game().drawn_count,
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bet_scorer::MEGA_SENA;
    use draw_fetcher::DrawResult;

    fn checked(text: &str, nums: [&str; 6]) -> CheckSession {
        let mut s = CheckSession::new(MEGA_SENA, text);
        s.begin_check();
        s.finish_check(Ok(DrawResult {
            contest_number: Some(2750),
            draw_date:      Some("24/06/2024".to_string()),
            drawn_numbers:  nums.iter().map(|n| n.to_string()).collect(),
            source_name:    "BrasilAPI".to_string(),
        }));
        s
    }

    #[test]
    fn report_lists_draw_counters_and_rows() {
        let s = checked(
            "02 05 10 17 21 28 33 36 43 53\n05 06 12 13 14 58",
            ["05", "10", "28", "33", "43", "53"],
        );
        let report = render_report(&s);
        assert!(report.contains("Apostas válidas detectadas: 2"));
        assert!(report.contains("Sorteio: 2750 (24/06/2024) - Dezenas: 05 10 28 33 43 53"));
        assert!(report.contains("Sena: 1  Quina: 0  Quadra: 0"));
        assert!(report.contains("SENA (ricos!)"));
        assert!(report.contains("Nada"));
        assert!(report.contains("Nota:"));
    }

    #[test]
    fn report_without_draw_shows_error() {
        let mut s = CheckSession::new(MEGA_SENA, "01 02 03 04 05 06");
        s.begin_check();
        s.finish_check(Err("Falha ao consultar resultado: BrasilAPI (timeout)".to_string()));
        let report = render_report(&s);
        assert!(report.contains("Apostas válidas detectadas: 1"));
        assert!(report.contains("Erro: Falha ao consultar resultado"));
        assert!(!report.contains("Sorteio:"));
    }

    #[test]
    fn six_number_bets_get_no_note() {
        let s = checked("05 06 12 13 14 58", ["05", "06", "12", "40", "41", "58"]);
        let report = render_report(&s);
        assert!(report.contains("Quadra"));
        assert!(report.contains("05 06 12 58"));
        assert!(!report.contains("Nota:"));
    }
}
