//! Cross-checks prost's encoding of trees built through the wrappers against the
//! schema-less codec in `pdata::wire`.

use pdata::pcommon::AnyValueType;
use pdata::plog::{Logs, SeverityNumber};
use pdata::plogotlp::{ExportRequest, ExportResponse};
use pdata::proto::otlpcollectorlogs::ExportLogsServiceRequest;
use pdata::wire::{count_nested, WireMessage, WireValue};
use pretty_assertions::assert_eq;
use prost::Message;

const LOG_RECORDS: &[u32] = &[1, 2, 2];

fn sample_logs() -> Logs {
    let mut logs = Logs::new();
    let mut rls = logs.resource_logs();
    for r in 0..2 {
        let mut rl = rls.append_empty();
        rl.set_schema_url("https://opentelemetry.io/schemas/1.5.0");
        rl.resource().attributes().put_str("service.name", format!("svc-{r}"));
        let mut sls = rl.scope_logs();
        let mut sl = sls.append_empty();
        sl.scope().set_name("io.example.logger");
        sl.scope().set_version("1.0.0");
        let mut records = sl.log_records();
        for i in 0..3 {
            let mut lr = records.append_empty();
            lr.set_time_unix_nano(1_700_000_000_000_000_000 + i);
            lr.set_severity_number(SeverityNumber::INFO);
            lr.set_severity_text("INFO");
            lr.set_flags(1);
            lr.set_trace_id(&[0xab; 16]);
            lr.set_span_id(&[0xcd; 8]);
            lr.body().set_str(format!("message {i}"));
            let mut attrs = lr.attributes();
            attrs.put_int("attempt", i as i64);
            attrs.put_double("ratio", 0.25);
            attrs.put_bool("retry", i > 0);
            attrs.put_bytes("raw", &[1, 2, 3]);
        }
    }
    logs
}

#[test]
fn logs_round_trip_through_schema_less_codec() {
    let logs = sample_logs();
    let wire1 = logs.marshal_proto();

    let raw = WireMessage::decode(&wire1).expect("schema-less decode");
    assert_eq!(2, raw.values(1).count());
    let wire2 = raw.encode();
    assert_eq!(wire1, wire2);

    let decoded = ExportLogsServiceRequest::decode(wire2.as_slice()).expect("prost decode");
    assert_eq!(logs.orig(), &decoded);
    assert_eq!(logs, Logs::unmarshal_proto(&wire2).expect("decode"));
}

#[test]
fn nested_values_survive_round_trip() {
    let mut logs = Logs::new();
    {
        let mut rls = logs.resource_logs();
        let mut rl = rls.append_empty();
        let mut sls = rl.scope_logs();
        let mut sl = sls.append_empty();
        let mut records = sl.log_records();
        let mut lr = records.append_empty();
        let mut body = lr.body();
        let mut list = body.set_empty_kv_list();
        let mut values = list.values();
        values.put_str("k", "v");
        values.put_empty("nested").set_empty_array().values().append_empty().set_int(-5);
    }
    let wire = logs.marshal_proto();
    assert_eq!(wire, WireMessage::decode(&wire).expect("decode").encode());

    let mut decoded = Logs::unmarshal_proto(&wire).expect("decode");
    let mut rls = decoded.resource_logs();
    let mut rl = rls.at(0);
    let mut sls = rl.scope_logs();
    let mut sl = sls.at(0);
    let mut records = sl.log_records();
    let mut lr = records.at(0);
    let mut body = lr.body();
    assert_eq!(AnyValueType::KvList, body.value_type());
    let mut list = body.kv_list().expect("kv_list");
    let mut values = list.values();
    assert_eq!(vec!["k", "nested"], values.keys().collect::<Vec<_>>());
    let mut nested = values.get("nested").expect("nested");
    let mut array = nested.array().expect("array");
    assert_eq!(-5, array.values().at(0).int());
}

#[test]
fn log_record_counts_agree() {
    let mut logs = Logs::new();
    let counts = |logs: &Logs| {
        let wire = logs.marshal_proto();
        (logs.log_record_count(), count_nested(&wire, LOG_RECORDS).expect("count"))
    };
    assert_eq!((0, 0), counts(&logs));

    logs.resource_logs().append_empty();
    assert_eq!((0, 0), counts(&logs));

    logs.resource_logs().at(0).scope_logs().append_empty();
    assert_eq!((0, 0), counts(&logs));

    logs.resource_logs().at(0).scope_logs().at(0).log_records().append_empty();
    assert_eq!((1, 1), counts(&logs));

    {
        let mut rls = logs.resource_logs();
        rls.ensure_capacity(3);
        rls.append_empty().scope_logs().append_empty();
        let mut rl = rls.append_empty();
        let mut sls = rl.scope_logs();
        let mut sl = sls.append_empty();
        let mut records = sl.log_records();
        for _ in 0..5 {
            records.append_empty();
        }
    }
    assert_eq!((6, 6), counts(&logs));
    assert_eq!((6, 6), counts(&sample_logs()));
}

#[test]
fn export_request_and_logs_share_encoding() {
    let logs = sample_logs();
    let expected = logs.marshal_proto();
    let req = ExportRequest::from_logs(logs);
    assert_eq!(expected, req.marshal_proto());
}

#[test]
fn partial_success_fields_are_on_the_wire() {
    let mut resp = ExportResponse::new();
    resp.partial_success().set_rejected_log_records(13);
    resp.partial_success().set_error_message("error message");
    let wire = resp.marshal_proto();

    let raw = WireMessage::decode(&wire).expect("decode");
    let inner = raw.messages(1).expect("partial_success");
    assert_eq!(1, inner.len());
    assert_eq!(
        vec![&WireValue::Varint(13)],
        inner[0].values(1).collect::<Vec<_>>()
    );
    assert_eq!(
        vec![&WireValue::LengthDelimited(b"error message".to_vec())],
        inner[0].values(2).collect::<Vec<_>>()
    );
    assert_eq!(wire, raw.encode());
}
