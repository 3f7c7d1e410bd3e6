use aura_core::{Alert, Datum};

/// Consumer of the vitals stream. Every callback runs on the tick that
/// produced it, never concurrently with another.
pub trait VitalsSink: Send {
    fn on_data(&mut self, datum: &Datum);
    fn on_alert(&mut self, alert: &Alert);
    fn on_alert_cleared(&mut self, alert_id: &str);

    /// The evaluator's critical flag changed. Called once per transition.
    fn on_critical_changed(&mut self, _active: bool) {}
}

impl<S: VitalsSink + ?Sized> VitalsSink for Box<S> {
    fn on_data(&mut self, datum: &Datum) {
        (**self).on_data(datum)
    }

    fn on_alert(&mut self, alert: &Alert) {
        (**self).on_alert(alert)
    }

    fn on_alert_cleared(&mut self, alert_id: &str) {
        (**self).on_alert_cleared(alert_id)
    }

    fn on_critical_changed(&mut self, active: bool) {
        (**self).on_critical_changed(active)
    }
}

impl<S: VitalsSink + ?Sized> VitalsSink for &mut S {
    fn on_data(&mut self, datum: &Datum) {
        (**self).on_data(datum)
    }

    fn on_alert(&mut self, alert: &Alert) {
        (**self).on_alert(alert)
    }

    fn on_alert_cleared(&mut self, alert_id: &str) {
        (**self).on_alert_cleared(alert_id)
    }

    fn on_critical_changed(&mut self, active: bool) {
        (**self).on_critical_changed(active)
    }
}
