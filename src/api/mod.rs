pub mod invoicecloud;
