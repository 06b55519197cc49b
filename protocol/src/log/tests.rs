#[cfg(test)]
mod tests {
    use crate::log::{LogLine, LogLines, is_noise, process_log};

    #[test]
    fn test_parse_move_line() {
        let line = LogLine::parse("|move|p1a: Pikachu|Thunderbolt|p2a: Charizard").unwrap();

        assert_eq!(line.command, "move");
        assert_eq!(line.args, vec!["p1a: Pikachu", "Thunderbolt", "p2a: Charizard"]);
        assert_eq!(line.raw, "|move|p1a: Pikachu|Thunderbolt|p2a: Charizard");
    }

    #[test]
    fn test_parse_keeps_free_text_fields() {
        let line = LogLine::parse("  |switch|p1a: Sparky|Pikachu, L50, M|150/150  ").unwrap();

        assert_eq!(line.command, "switch");
        assert_eq!(line.arg(1), Some("Pikachu, L50, M"));
        assert_eq!(line.arg(2), Some("150/150"));
        assert_eq!(line.arg(3), None);
    }

    #[test]
    fn test_parse_empty_args() {
        let line = LogLine::parse("|tie").unwrap();
        assert_eq!(line.command, "tie");
        assert!(line.args.is_empty());

        let spacer = LogLine::parse("|").unwrap();
        assert_eq!(spacer.command, "");
    }

    #[test]
    fn test_parse_rejects_non_protocol() {
        assert!(LogLine::parse("").is_none());
        assert!(LogLine::parse("   ").is_none());
        assert!(LogLine::parse("just some text").is_none());
        assert!(LogLine::parse("-damage|p1a: Pikachu|0 fnt").is_none());
    }

    #[test]
    fn test_noise_prefixes() {
        assert!(is_noise("|c|+Alice|gg"));
        assert!(is_noise("|c:|1700000000|Bob|hi"));
        assert!(is_noise("|chat|Alice|hello"));
        assert!(is_noise("|html|<div>hi</div>"));
        assert!(is_noise("|raw|<b>Rating</b>"));
        assert!(is_noise("|error|[Invalid choice]"));
        assert!(!is_noise("|move|p1a: Pikachu|Tackle"));
        assert!(!is_noise("|cant|p1a: Pikachu|par"));
    }

    #[test]
    fn test_terminal_commands() {
        assert!(LogLine::parse("|win|Alice").unwrap().is_terminal());
        assert!(LogLine::parse("|tie").unwrap().is_terminal());
        assert!(LogLine::parse("|forcewin|p1").unwrap().is_terminal());
        assert!(!LogLine::parse("|turn|3").unwrap().is_terminal());
        assert!(!LogLine::parse("|winner|Alice").unwrap().is_terminal());
    }

    #[test]
    fn test_process_log_stops_at_terminal() {
        let log = "|turn|1\n|move|p1a: Pikachu|Tackle\n|win|Alice\n|turn|2\n|move|p2a: Eevee|Tackle\n";
        let lines = process_log(log);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines.last().unwrap().command, "win");
        assert!(lines.iter().all(|l| l.command != "turn" || l.arg(0) == Some("1")));
    }

    #[test]
    fn test_process_log_filters_noise() {
        let log = "\
|j|Alice
|c|Alice|good luck
|html|<div class=\"broadcast\">hi</div>

not a protocol line
|error|[Invalid choice] Can't switch
|switch|p1a: Pikachu|Pikachu, L50|150/150
|c:|1700000000|Bob|gl
|tie
";
        let lines = process_log(log);
        let commands: Vec<&str> = lines.iter().map(|l| l.command.as_str()).collect();

        assert_eq!(commands, vec!["j", "switch", "tie"]);
        assert!(lines.iter().all(|l| !l.raw.contains("good luck")));
    }

    #[test]
    fn test_process_log_handles_crlf() {
        let lines = process_log("|turn|1\r\n|win|Alice\r\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].arg(0), Some("Alice"));
    }

    #[test]
    fn test_log_lines_is_fused_after_terminal() {
        let mut lines = LogLines::new("|win|Alice\n|turn|2\n");
        assert_eq!(lines.next().unwrap().command, "win");
        assert!(lines.next().is_none());
        assert!(lines.next().is_none());
    }
}
