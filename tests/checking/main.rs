#[cfg(test)]
mod audit {
    use std::path::{Path, PathBuf};

    use crosscheck::checking::{audit, validate_recipes, Layout};
    use crosscheck::loading::{Filesystem, Memory, Source};
    use crosscheck::problem::Severity;

    fn samples() -> Layout {
        let dir = Path::new("tests/samples");
        Layout {
            catalog: dir.join("CommandCatalog.java"),
            cards: dir.join("religions.json"),
            client: dir.join("AxiomUiClientEvents.java"),
            server: dir.join("ModCommunicationHandler.java"),
            manifest: dir.join("plugin.yml"),
            sources: dir.join("plugin"),
            server_fallbacks: Vec::new(),
        }
    }

    fn memory_layout() -> Layout {
        Layout {
            catalog: PathBuf::from("mod/CommandCatalog.java"),
            cards: PathBuf::from("mod/religions.json"),
            client: PathBuf::from("mod/Client.java"),
            server: PathBuf::from("plugin/network/Handler.java"),
            manifest: PathBuf::from("plugin/plugin.yml"),
            sources: PathBuf::from("plugin/src"),
            server_fallbacks: vec![PathBuf::from("plugin/legacy/Handler.java")],
        }
    }

    fn command(name: &str, aliases: &str, permission: &str) -> String {
        format!(
            r#"
        new CommandInfo("{}", "Name", "Short", "Full description.", CommandCategory.GENERAL,
            List.of({}), List.of("{}"), "{}", false),"#,
            name, aliases, name, permission
        )
    }

    fn catalog(commands: &[String]) -> String {
        format!("List<CommandInfo> ALL = List.of({}\n);", commands.concat())
    }

    const CARDS: &str = r##"[{"id": "sun", "name": "Sun", "tagline": "Light", "symbol": "*", "color": "#ffcc00", "details": ["Warm"]}]"##;

    const CLIENT: &str = r#"
sendToServer(CHANNEL, "get_nation");
switch (type) {
    case "nation_data": break;
    case "ui_autotest_start": break;
    case "open_main_menu": break;
}
"#;

    const SERVER: &str = r#"
case "get_nation": sendData(player, "nation_data", json); break;
"#;

    fn consistent() -> Memory {
        Memory::new()
            .with(
                "mod/CommandCatalog.java",
                catalog(&[command("/nation", r#""/n""#, "axiom.nation")]),
            )
            .with("mod/religions.json", CARDS)
            .with("mod/Client.java", CLIENT)
            .with("plugin/network/Handler.java", SERVER)
            .with("plugin/plugin.yml", "permissions:\n  axiom.nation:\n    default: true\n")
            .with("plugin/src/Main.java", r#"p.hasPermission("axiom.nation");"#)
    }

    #[test]
    fn sample_project_passes() {
        let report = audit(&Filesystem, &samples());
        assert_eq!(report.error_lines(), Vec::<String>::new());
        assert_eq!(
            report
                .warnings()
                .count(),
            0
        );
        assert!(report.is_clean());
    }

    #[test]
    fn consistent_project_passes() {
        let report = audit(&consistent(), &memory_layout());
        assert!(report
            .findings()
            .is_empty());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn repeated_runs_agree() {
        let source = consistent().with("mod/Client.java", r#"sendToServer(CHANNEL, "get_other");"#);
        let layout = memory_layout();
        assert_eq!(audit(&source, &layout), audit(&source, &layout));
    }

    #[test]
    fn contract_mismatch() {
        let source = consistent()
            .with(
                "mod/Client.java",
                r#"
sendToServer(CHANNEL, "get_a");
sendToServer(CHANNEL, "get_b");
switch (type) { case "ui_autotest_start": break; case "open_main_menu": break; }
"#,
            )
            .with(
                "plugin/network/Handler.java",
                r#"case "get_b": break; case "get_c": break;"#,
            );

        let report = audit(&source, &memory_layout());
        assert_eq!(
            report.error_lines(),
            vec![
                "UI->Server: no handlers for get_a",
                "Server: handlers with no client request: get_c",
            ]
        );
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn missing_permission() {
        let source = consistent()
            .with(
                "mod/CommandCatalog.java",
                catalog(&[command("/x", "", "axiom.x")]),
            )
            .with("plugin/src/Main.java", r#"if (p.hasPermission("axiom.y")) {}"#)
            .with("plugin/plugin.yml", "permissions:\n  axiom.x:\n");

        let report = audit(&source, &memory_layout());
        assert_eq!(
            report.error_lines(),
            vec!["plugin.yml: missing permissions: axiom.y"]
        );
    }

    #[test]
    fn flawed_record_permission_still_required() {
        let source = consistent().with(
            "mod/CommandCatalog.java",
            catalog(&[
                command("/nation", "", "axiom.nation"),
                r#"new CommandInfo("/x", "", "S", "F", CommandCategory.A, List.of(), List.of(), "axiom.secret", false)"#.to_string(),
            ]),
        );

        let report = audit(&source, &memory_layout());
        assert_eq!(
            report.error_lines(),
            vec![
                "CommandCatalog[2]: empty displayName",
                "plugin.yml: missing permissions: axiom.secret",
            ]
        );
    }

    #[test]
    fn missing_manifest_reports_required_permissions() {
        let source = Memory::new()
            .with(
                "mod/CommandCatalog.java",
                catalog(&[command("/nation", "", "axiom.nation")]),
            )
            .with("mod/religions.json", CARDS)
            .with("mod/Client.java", CLIENT)
            .with("plugin/network/Handler.java", SERVER)
            .with("plugin/src/Main.java", r#"p.hasPermission("axiom.admin");"#);

        let report = audit(&source, &memory_layout());
        assert_eq!(
            report.error_lines(),
            vec![
                "plugin.yml: file not found",
                "plugin.yml: missing permissions: axiom.admin, axiom.nation",
            ]
        );
    }

    #[test]
    fn alias_collision_across_records() {
        let source = consistent().with(
            "mod/CommandCatalog.java",
            catalog(&[
                command("/nation", r#""/n""#, "axiom.nation"),
                command("/news", r#""/nation", "/n""#, "axiom.nation"),
            ]),
        );

        let report = audit(&source, &memory_layout());
        assert_eq!(
            report.error_lines(),
            vec![
                "CommandCatalog[2]: alias '/nation' collides with an existing command (#1)",
                "CommandCatalog[2]: alias '/n' collides with an existing command (#1)",
            ]
        );
    }

    #[test]
    fn legacy_server_location() {
        let mut source = consistent();
        source.insert("plugin/legacy/Handler.java", SERVER);

        let moved = Memory::new()
            .with(
                "mod/CommandCatalog.java",
                catalog(&[command("/nation", "", "axiom.nation")]),
            )
            .with("mod/religions.json", CARDS)
            .with("mod/Client.java", CLIENT)
            .with("plugin/legacy/Handler.java", SERVER)
            .with("plugin/plugin.yml", "permissions:\n  axiom.nation:\n")
            .with("plugin/src/Main.java", "");

        assert!(audit(&moved, &memory_layout()).is_clean());
        assert!(audit(&source, &memory_layout()).is_clean());
    }

    #[test]
    fn unreadable_server_skips_contract() {
        let source = Memory::new()
            .with(
                "mod/CommandCatalog.java",
                catalog(&[command("/nation", "", "axiom.nation")]),
            )
            .with("mod/religions.json", CARDS)
            .with("mod/Client.java", CLIENT)
            .with("plugin/plugin.yml", "permissions:\n  axiom.nation:\n")
            .with("plugin/src/Main.java", "");

        let report = audit(&source, &memory_layout());
        assert_eq!(report.error_lines(), vec!["Handler.java: file not found"]);
    }

    #[test]
    fn manifest_without_permissions() {
        let source = consistent()
            .with("plugin/plugin.yml", "name: Axiom\n")
            .with("plugin/src/Main.java", "");

        let report = audit(&source, &memory_layout());
        assert_eq!(
            report.error_lines(),
            vec!["plugin.yml: missing permissions: axiom.nation"]
        );

        let warnings: Vec<String> = report
            .warnings()
            .map(|finding| finding.to_string())
            .collect();
        assert_eq!(warnings, vec!["plugin.yml: no permissions section"]);
    }

    #[test]
    fn escape_warnings_do_not_fail() {
        let source = consistent().with(
            "mod/CommandCatalog.java",
            r#"new CommandInfo("/nation", "Nati\u00f6n", "Short", "Full.", CommandCategory.GENERAL, List.of(), List.of(), "axiom.nation", false)"#,
        );

        let report = audit(&source, &memory_layout());
        assert!(report.is_clean());

        let finding = &report.findings()[0];
        assert_eq!(finding.severity, Severity::Warning);
        assert_eq!(
            finding.to_string(),
            r"CommandCatalog[1]: unrecognized escape '\u' in displayName"
        );
    }

    #[test]
    fn sample_recipes() {
        let path = Path::new("tests/samples/recipes.json");
        let text = Filesystem
            .read(path)
            .unwrap();
        let recipes = validate_recipes(&text, "recipes.json");

        assert_eq!(recipes.count, 2);
        assert_eq!(recipes.errors(), 0);
        assert_eq!(recipes.warnings(), 1);
        assert_eq!(
            recipes.findings[0].to_string(),
            "minecraft:bread: 'modified'[0].item has unexpected format: Wheat"
        );
    }
}
