pub mod bill_form;
