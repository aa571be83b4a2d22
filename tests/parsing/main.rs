#[cfg(test)]
mod samples {
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::Path;

    use crosscheck::checking::{code_permissions, scan_client, scan_server, validate_catalog, CatalogShape};
    use crosscheck::parsing::{calls, extract_blocks, parse_single_literal, split_arguments, CallMarker};

    fn load(name: &str) -> String {
        let path = Path::new("tests/samples/").join(name);
        fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", path, e))
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    #[test]
    fn catalog_declarations() {
        let content = load("CommandCatalog.java");

        let found = calls(&content, CallMarker::constructor("CommandInfo"));
        assert_eq!(found.len(), 3);
        for (offset, arguments) in &found {
            assert_eq!(arguments.len(), 9);
            assert!(content[*offset..]
                .trim_start()
                .starts_with(arguments[0]));
        }

        let commands: Vec<String> = found
            .iter()
            .filter_map(|(_, arguments)| parse_single_literal(arguments[0]))
            .map(|literal| literal.value)
            .collect();
        assert_eq!(commands, vec!["/nation", "/home", "/religion"]);
    }

    #[test]
    fn catalog_records() {
        let content = load("CommandCatalog.java");
        let catalog = validate_catalog(&content, &CatalogShape::default());

        assert!(catalog
            .findings
            .is_empty());
        assert_eq!(catalog.records.len(), 3);

        let nation = &catalog.records[0];
        assert_eq!(
            nation.full_desc,
            "Create, rename (or disband) a nation. Use \"/nation info\" for details."
        );
        assert_eq!(nation.aliases, vec!["/n", "/nat"]);
        assert!(!nation.requires_nation);

        let religion = &catalog.records[2];
        assert_eq!(
            religion.full_desc,
            "Join a religion, found one, or perform a rite.\tRites cost piety."
        );
        assert_eq!(religion.category_name(), "RELIGION");

        assert_eq!(
            catalog.permissions,
            set(&["axiom.home", "axiom.nation", "axiom.religion"])
        );
    }

    #[test]
    fn nested_arguments_split_at_top_level() {
        let content = load("AxiomUiClientEvents.java");

        let block = extract_blocks(&content, CallMarker::call("sendToServer"))
            .next()
            .unwrap();
        assert_eq!(
            split_arguments(block.text),
            vec!["CHANNEL", r#""get_nation""#, r#"payload("tab", "overview")"#]
        );
    }

    #[test]
    fn contract_sides() {
        let client = scan_client(&load("AxiomUiClientEvents.java"));
        assert_eq!(client.requests, set(&["get_nation", "get_religion"]));
        assert_eq!(
            client.handled,
            set(&[
                "nation_data",
                "open_main_menu",
                "religion_data",
                "ui_autotest_start"
            ])
        );

        let server = scan_server(&load("ModCommunicationHandler.java"));
        assert_eq!(server.handled, set(&["get_nation", "get_religion"]));
        assert_eq!(server.responses, set(&["nation_data", "religion_data"]));
    }

    #[test]
    fn permission_checks_in_sources() {
        let java = load("plugin/com/axiom/commands/AdminCommand.java");
        assert_eq!(code_permissions(&java), set(&["axiom.admin"]));

        let kotlin = load("plugin/com/axiom/events/HomeListener.kt");
        assert_eq!(code_permissions(&kotlin), set(&["axiom.home"]));
    }

    #[test]
    fn broken_tail_is_dropped() {
        let mut content = load("CommandCatalog.java");
        content.push_str("\nnew CommandInfo(\"/broken\", List.of(\"unclosed\"");

        assert_eq!(
            extract_blocks(&content, CallMarker::constructor("CommandInfo")).count(),
            3
        );
    }
}
