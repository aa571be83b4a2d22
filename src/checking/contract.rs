//! The request/response contract between the UI client and the server.
//!
//! Neither side shares a schema with the other; each is scanned on its own
//! for the call sites that send or handle a message, and the resulting
//! identifier sets are compared in both directions.

use std::collections::BTreeSet;
use tracing::debug;

use crate::parsing::{calls, keyword_literals, parse_single_literal, CallMarker};
use crate::problem::{Finding, Locator};

/// Requests are named with this prefix; other `case` labels in the server
/// belong to unrelated switches.
pub const REQUEST_PREFIX: &str = "get_";

/// Responses the server produces without the client having asked for them
/// by name. They are treated as sent so that the client's handlers for
/// them are not reported. If the contract changes so that these become
/// ordinary requests, they should be removed from this list.
pub const SERVER_INTERNAL_RESPONSES: &[&str] = &["ui_autotest_start", "open_main_menu"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractProblem {
    UnhandledRequests(Vec<String>),
    UnrequestedHandlers(Vec<String>),
    UnhandledResponses(Vec<String>),
    UnsentResponses(Vec<String>),
}

impl ContractProblem {
    pub fn message(&self) -> String {
        match self {
            ContractProblem::UnhandledRequests(names) => {
                format!("no handlers for {}", names.join(", "))
            }
            ContractProblem::UnrequestedHandlers(names) => {
                format!("handlers with no client request: {}", names.join(", "))
            }
            ContractProblem::UnhandledResponses(names) => {
                format!("client does not handle {}", names.join(", "))
            }
            ContractProblem::UnsentResponses(names) => {
                format!("handlers with no server response: {}", names.join(", "))
            }
        }
    }
}

/// What the client sends and what it knows how to receive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientSide {
    pub requests: BTreeSet<String>,
    pub handled: BTreeSet<String>,
}

/// What the server handles and what it sends back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerSide {
    pub handled: BTreeSet<String>,
    pub responses: BTreeSet<String>,
}

// The literal second argument of every call to `name`.
fn second_literals(text: &str, name: &str) -> Vec<String> {
    calls(text, CallMarker::call(name))
        .into_iter()
        .filter_map(|(_, arguments)| {
            let argument = arguments.get(1)?;
            parse_single_literal(argument).map(|literal| literal.value)
        })
        .collect()
}

/// Requests issued through `sendToServer(channel, "get_...", ...)` and,
/// as shorthand, `requestUpdate("x")` for request `get_x`. Responses
/// handled are the labels of every `case "..."` arm.
pub fn scan_client(text: &str) -> ClientSide {
    let mut client = ClientSide::default();

    for name in second_literals(text, "sendToServer") {
        if name.starts_with(REQUEST_PREFIX) && name.len() > REQUEST_PREFIX.len() {
            client
                .requests
                .insert(name);
        }
    }

    for (_, arguments) in calls(text, CallMarker::call("requestUpdate")) {
        if let [argument] = arguments.as_slice() {
            if let Some(literal) = parse_single_literal(argument) {
                if !literal
                    .value
                    .is_empty()
                {
                    client
                        .requests
                        .insert(format!("{}{}", REQUEST_PREFIX, literal.value));
                }
            }
        }
    }

    for literal in keyword_literals(text, "case") {
        if !literal
            .value
            .is_empty()
        {
            client
                .handled
                .insert(literal.value);
        }
    }

    debug!(
        "Client: {} requests, {} handled responses",
        client
            .requests
            .len(),
        client
            .handled
            .len()
    );
    client
}

/// Requests handled are the `case "get_..."` labels; responses are sent
/// through `sendData(player, "name", ...)`.
pub fn scan_server(text: &str) -> ServerSide {
    let mut server = ServerSide::default();

    for literal in keyword_literals(text, "case") {
        let name = literal.value;
        if name.starts_with(REQUEST_PREFIX) && name.len() > REQUEST_PREFIX.len() {
            server
                .handled
                .insert(name);
        }
    }

    for name in second_literals(text, "sendData") {
        if !name.is_empty() {
            server
                .responses
                .insert(name);
        }
    }

    debug!(
        "Server: {} handled requests, {} responses",
        server
            .handled
            .len(),
        server
            .responses
            .len()
    );
    server
}

fn difference(left: &BTreeSet<String>, right: &BTreeSet<String>) -> Vec<String> {
    left.difference(right)
        .cloned()
        .collect()
}

/// Report every asymmetry between the two sides. There are four
/// independent checks, always made in the same order, and each one is a
/// one-way set difference.
pub fn compare(client: &ClientSide, server: &ServerSide) -> Vec<Finding> {
    let mut findings = Vec::new();

    let missing_on_server = difference(&client.requests, &server.handled);
    if !missing_on_server.is_empty() {
        findings.push(Finding::error(
            Locator::artifact("UI->Server"),
            ContractProblem::UnhandledRequests(missing_on_server),
        ));
    }

    let server_only = difference(&server.handled, &client.requests);
    if !server_only.is_empty() {
        findings.push(Finding::error(
            Locator::artifact("Server"),
            ContractProblem::UnrequestedHandlers(server_only),
        ));
    }

    let mut responses = server
        .responses
        .clone();
    responses.extend(
        SERVER_INTERNAL_RESPONSES
            .iter()
            .map(|name| name.to_string()),
    );

    let missing_on_client = difference(&responses, &client.handled);
    if !missing_on_client.is_empty() {
        findings.push(Finding::error(
            Locator::artifact("Server->UI"),
            ContractProblem::UnhandledResponses(missing_on_client),
        ));
    }

    let client_only = difference(&client.handled, &responses);
    if !client_only.is_empty() {
        findings.push(Finding::error(
            Locator::artifact("UI"),
            ContractProblem::UnsentResponses(client_only),
        ));
    }

    findings
}

pub fn validate_contract(client: &str, server: &str) -> Vec<Finding> {
    compare(&scan_client(client), &scan_server(server))
}
