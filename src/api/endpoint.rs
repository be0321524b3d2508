/// Operation descriptors: one variant per remote query, each mapping to a
/// path template plus its path and query parameters.
use clap::ValueEnum;

/// Live configuration API, version 1 (domains, streams, events, RTMP).
const LIVE_V1: &str = "/config-media-live/v1/live";

/// MSL origin API, version 2.
const MSL_ORIGIN_V2: &str = "/config-media-live/v2/msl-origin";

/// Kind of CP code to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum CpcodeType {
    #[default]
    #[value(name = "INGEST")]
    Ingest,
    #[value(name = "STORAGE")]
    Storage,
    #[value(name = "DELIVERY")]
    Delivery,
}

impl CpcodeType {
    /// Wire value for the `type` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ingest => "INGEST",
            Self::Storage => "STORAGE",
            Self::Delivery => "DELIVERY",
        }
    }
}

/// A read-only query against the configuration API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ListDomains,
    ListStreams {
        domain: String,
    },
    ListEvents {
        domain: String,
        stream_id: String,
    },
    GetEvent {
        domain: String,
        stream_id: String,
        event_name: String,
    },
    ListRtmpConfigs,
    ListRtmpStreams,
    ListStorageGroups,
    GetDomain {
        domain: String,
    },
    GetStream {
        domain: String,
        stream_id: String,
    },
    GetRtmpConfig {
        cpcode: String,
    },
    GetRtmpStream {
        stream_id: String,
    },
    /// Sorted by creation date, newest first.
    ListMslStreams,
    GetMslStream {
        stream_id: String,
    },
    ListCdns,
    ListCpcodes {
        cpcode_type: CpcodeType,
        unused: bool,
    },
}

/// Everything needed to build a request URL for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Path with `{name}` placeholders.
    pub template: String,
    /// Values for the placeholders, by name.
    pub params: Vec<(&'static str, String)>,
    /// Query parameters the operation always sends.
    pub query: Vec<(&'static str, String)>,
}

impl Endpoint {
    fn new(template: String) -> Self {
        Self {
            template,
            params: Vec::new(),
            query: Vec::new(),
        }
    }

    fn param(mut self, name: &'static str, value: &str) -> Self {
        self.params.push((name, value.to_owned()));
        self
    }

    fn query(mut self, name: &'static str, value: &str) -> Self {
        self.query.push((name, value.to_owned()));
        self
    }

    /// Substitute path parameters into the template.
    ///
    /// Values are inserted verbatim. Placeholders without a value are left in place.
    #[must_use]
    pub fn path(&self) -> String {
        let mut path = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(open) = rest.find('{') {
            path.push_str(&rest[..open]);
            let Some(len) = rest[open..].find('}') else {
                rest = &rest[open..];
                break;
            };
            let placeholder = &rest[open..=open + len];
            let name = &placeholder[1..placeholder.len() - 1];
            match self.params.iter().find(|(n, _)| *n == name) {
                Some((_, value)) => path.push_str(value),
                None => path.push_str(placeholder),
            }
            rest = &rest[open + len + 1..];
        }

        path.push_str(rest);
        path
    }
}

impl Operation {
    /// Subcommand-style label, used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListDomains => "list-domains",
            Self::ListStreams { .. } => "list-streams",
            Self::ListEvents { .. } => "list-events",
            Self::GetEvent { .. } => "get-event",
            Self::ListRtmpConfigs => "list-rtmp-configs",
            Self::ListRtmpStreams => "list-rtmp-streams",
            Self::ListStorageGroups => "list-storage-group",
            Self::GetDomain { .. } => "get-domain",
            Self::GetStream { .. } => "get-stream",
            Self::GetRtmpConfig { .. } => "get-rtmp-config",
            Self::GetRtmpStream { .. } => "get-rtmp-stream",
            Self::ListMslStreams => "list-msl-streams",
            Self::GetMslStream { .. } => "get-msl-streams",
            Self::ListCdns => "list-CDNs",
            Self::ListCpcodes { .. } => "list-cpcodes",
        }
    }

    /// Describe the request for this operation.
    #[must_use]
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::ListDomains => Endpoint::new(LIVE_V1.to_owned()),
            Self::ListStreams { domain } => {
                Endpoint::new(format!("{LIVE_V1}/{{domain}}/stream")).param("domain", domain)
            }
            Self::ListEvents { domain, stream_id } => {
                Endpoint::new(format!("{LIVE_V1}/{{domain}}/stream/{{streamId}}/event"))
                    .param("domain", domain)
                    .param("streamId", stream_id)
            }
            Self::GetEvent {
                domain,
                stream_id,
                event_name,
            } => Endpoint::new(format!(
                "{LIVE_V1}/{{domain}}/stream/{{streamId}}/event/{{eventName}}"
            ))
            .param("domain", domain)
            .param("streamId", stream_id)
            .param("eventName", event_name),
            Self::ListRtmpConfigs => Endpoint::new(format!("{LIVE_V1}/rtmp/configuration")),
            Self::ListRtmpStreams => Endpoint::new(format!("{LIVE_V1}/rtmp/stream")),
            Self::ListStorageGroups => Endpoint::new(format!("{LIVE_V1}/rtmp/storage-group")),
            Self::GetDomain { domain } => {
                Endpoint::new(format!("{LIVE_V1}/{{domain}}")).param("domain", domain)
            }
            Self::GetStream { domain, stream_id } => {
                Endpoint::new(format!("{LIVE_V1}/{{domain}}/stream/{{streamId}}"))
                    .param("domain", domain)
                    .param("streamId", stream_id)
            }
            Self::GetRtmpConfig { cpcode } => {
                Endpoint::new(format!("{LIVE_V1}/rtmp/configuration/{{cpcode}}"))
                    .param("cpcode", cpcode)
            }
            Self::GetRtmpStream { stream_id } => {
                Endpoint::new(format!("{LIVE_V1}/rtmp/stream/{{streamId}}"))
                    .param("streamId", stream_id)
            }
            Self::ListMslStreams => Endpoint::new(format!("{MSL_ORIGIN_V2}/streams"))
                .query("sortKey", "createdDate")
                .query("sortOrder", "DESC"),
            Self::GetMslStream { stream_id } => {
                Endpoint::new(format!("{MSL_ORIGIN_V2}/streams/{{streamId}}"))
                    .param("streamId", stream_id)
            }
            Self::ListCdns => Endpoint::new(format!("{MSL_ORIGIN_V2}/cdns")),
            Self::ListCpcodes {
                cpcode_type,
                unused,
            } => Endpoint::new(format!("{MSL_ORIGIN_V2}/cpcodes"))
                .query("type", cpcode_type.as_str())
                .query("unused", if *unused { "true" } else { "false" }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(op: &Operation) -> String {
        op.endpoint().path()
    }

    #[test]
    fn test_list_paths() {
        assert_eq!(path(&Operation::ListDomains), "/config-media-live/v1/live");
        assert_eq!(
            path(&Operation::ListRtmpConfigs),
            "/config-media-live/v1/live/rtmp/configuration"
        );
        assert_eq!(
            path(&Operation::ListRtmpStreams),
            "/config-media-live/v1/live/rtmp/stream"
        );
        assert_eq!(
            path(&Operation::ListStorageGroups),
            "/config-media-live/v1/live/rtmp/storage-group"
        );
        assert_eq!(
            path(&Operation::ListMslStreams),
            "/config-media-live/v2/msl-origin/streams"
        );
        assert_eq!(path(&Operation::ListCdns), "/config-media-live/v2/msl-origin/cdns");
    }

    #[test]
    fn test_domain_and_stream_paths() {
        let domain = "example.com".to_owned();
        let stream_id = "1234".to_owned();
        assert_eq!(
            path(&Operation::ListStreams {
                domain: domain.clone()
            }),
            "/config-media-live/v1/live/example.com/stream"
        );
        assert_eq!(
            path(&Operation::ListEvents {
                domain: domain.clone(),
                stream_id: stream_id.clone(),
            }),
            "/config-media-live/v1/live/example.com/stream/1234/event"
        );
        assert_eq!(
            path(&Operation::GetEvent {
                domain: domain.clone(),
                stream_id: stream_id.clone(),
                event_name: "launch".to_owned(),
            }),
            "/config-media-live/v1/live/example.com/stream/1234/event/launch"
        );
        assert_eq!(
            path(&Operation::GetDomain {
                domain: domain.clone()
            }),
            "/config-media-live/v1/live/example.com"
        );
        assert_eq!(
            path(&Operation::GetStream { domain, stream_id }),
            "/config-media-live/v1/live/example.com/stream/1234"
        );
    }

    #[test]
    fn test_rtmp_and_msl_paths() {
        assert_eq!(
            path(&Operation::GetRtmpConfig {
                cpcode: "55555".to_owned()
            }),
            "/config-media-live/v1/live/rtmp/configuration/55555"
        );
        assert_eq!(
            path(&Operation::GetRtmpStream {
                stream_id: "42".to_owned()
            }),
            "/config-media-live/v1/live/rtmp/stream/42"
        );
        assert_eq!(
            path(&Operation::GetMslStream {
                stream_id: "42".to_owned()
            }),
            "/config-media-live/v2/msl-origin/streams/42"
        );
    }

    #[test]
    fn test_msl_stream_list_is_sorted_newest_first() {
        let endpoint = Operation::ListMslStreams.endpoint();
        assert_eq!(
            endpoint.query,
            vec![
                ("sortKey", "createdDate".to_owned()),
                ("sortOrder", "DESC".to_owned())
            ]
        );
    }

    #[test]
    fn test_cpcode_query() {
        let endpoint = Operation::ListCpcodes {
            cpcode_type: CpcodeType::Storage,
            unused: false,
        }
        .endpoint();
        assert_eq!(endpoint.path(), "/config-media-live/v2/msl-origin/cpcodes");
        assert_eq!(
            endpoint.query,
            vec![("type", "STORAGE".to_owned()), ("unused", "false".to_owned())]
        );
    }

    #[test]
    fn test_operations_without_query() {
        assert!(Operation::ListDomains.endpoint().query.is_empty());
        assert!(Operation::ListCdns.endpoint().query.is_empty());
    }

    #[test]
    fn test_unknown_placeholder_left_in_place() {
        let endpoint = Endpoint::new("/a/{x}/b/{y}".to_owned()).param("x", "1");
        assert_eq!(endpoint.path(), "/a/1/b/{y}");
    }

    #[test]
    fn test_value_with_braces_not_reexpanded() {
        let endpoint = Endpoint::new("/a/{x}/{y}".to_owned())
            .param("x", "{y}")
            .param("y", "2");
        assert_eq!(endpoint.path(), "/a/{y}/2");
    }
}
