pub mod table_decoder_test;
